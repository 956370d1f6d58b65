//! Holders built on [`ValidatedField`](crate::field::ValidatedField).
//!
//! Each holder keeps its field private and exposes a read accessor plus the
//! write operations its policy allows:
//!
//! | Holder | Field | Rule | Out of range |
//! |---|---|---|---|
//! | [`Fan`] | speed | `[0, 5]` | rejected |
//! | [`BankAccount`] | balance | deposit `> 0`, withdraw `0 < a <= balance` | rejected |
//! | [`Device`] | temperature | `[0, 40]` | clamped |

pub mod account;
pub mod device;
pub mod fan;

pub use account::BankAccount;
pub use device::Device;
pub use fan::Fan;
