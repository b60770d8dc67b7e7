//! Player-visible text shown through the notice sink.

/// Banner shown when play begins.
pub const START: &str = ">>> RobCo Simulation Active: Wasteland Survival Mode\n\
>>> Locate supplies and secure the exit before encountering hostiles.";

/// Explains how the game is won.
pub const OBJECTIVE: &str =
    ">>> Objective: Search boxes for Stimpaks and Radaways to stay prepared.";

/// Announces the pursuer.
pub const WARNING: &str = ">>> WARNING: Hostiles detected nearby. Proceed with caution.";

/// Summarizes the key bindings.
pub const CONTROLS: &str =
    ">>> Controls:\n[ARROWS] - Move\n[SPACE] - Check box\n[Q/ESC] - Quit";

/// Shown before the game ends at the player's request.
pub const QUIT: &str = ">>> Exiting RobCo Simulation...";

/// Alert shown when the goal item is found.
pub const WINNER: &str = ">>> Simulation Success: Mission accomplished.";

/// Alert shown when the pursuer catches the player.
pub const DEATH: &str = ">>> Simulation Ended: Hostile encounter resulted in failure.";

/// Shown when a search turns up nothing on an empty or box-less cell.
pub const EMPTY: &str = ">>> No items found here.";

/// Flavor text for a box that is opened and found empty; one is picked at random.
pub const EMPTY_BOX_FLAVOR: [&str; 5] = [
    "The box is empty.",
    "Nothing found here.",
    "This box holds no items.",
    "No supplies in this box.",
    "Keep looking!",
];

/// Notices shown, in order, when play begins.
pub const OPENING: [&str; 4] = [START, OBJECTIVE, WARNING, CONTROLS];
