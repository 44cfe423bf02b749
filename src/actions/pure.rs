//! Pure functions for actions
//!
//! These functions have no side effects and are deterministic.

mod ticket;

pub use ticket::{FakeTicket, STEAM_ID_OFFSET, TICKET_LEN, steam_id_from_hex};
