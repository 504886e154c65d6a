//! Staff and portal role types.

use serde::{Deserialize, Serialize};

/// Role tag stored on portal user profiles (`usuarios.rol`).
/// Kept as the legacy Spanish value — it is persisted data, not a label.
pub const PORTAL_USER_ROLE: &str = "cliente";

/// Staff permission level carried in gateway identity headers.
///
/// Wire format: `u8` (0 = Viewer, 1 = Manager, 2 = Admin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Viewer = 0,
    Manager = 1,
    Admin = 2,
}

impl StaffRole {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Viewer),
            1 => Some(Self::Manager),
            2 => Some(Self::Admin),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl PartialOrd for StaffRole {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StaffRole {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_u8().cmp(&other.as_u8())
    }
}
