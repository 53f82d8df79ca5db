use std::time::Duration;

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const TICK_RATE: Duration = Duration::from_millis(200);
pub(crate) const STATUS_TTL: Duration = Duration::from_secs(5);

pub(crate) const COMMAND_HELP: &str = concat!(
    "Commands: /help, /add <text>, /toggle [id], /delete [id], ",
    "/filter <all|pending|completed>, /quit"
);

pub(crate) const STATUS_ENTER_ADD: &str = "What needs to be done? (Enter to add, Esc to cancel)";
pub(crate) const STATUS_COMMAND_PALETTE: &str =
    "Type a /command • Up/Down: navigate • Tab/Right: complete • Enter: run • Esc: cancel";
pub(crate) const STATUS_HELP: &str = "Keyboard reference — Enter/Esc to close";
pub(crate) const STATUS_CONFIRM_DELETE: &str =
    "Confirm deletion — arrows choose, Enter confirms, Esc cancels";
