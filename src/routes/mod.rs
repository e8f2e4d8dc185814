/// Router Module Index
///
/// Routes are split by access level. The split is enforced with router layers, so a
/// handler cannot end up public by accident.

/// Routes reachable without a session: sign-in, sign-out, health and the pure
/// submenu toggle.
pub mod public;

/// Routes behind the session route guard.
pub mod authenticated;
