// Fake Steam auth ticket
//
// Steam only allows one auth ticket per account at a time, so the second
// instance would fail to get one. A fake ticket of the right shape with the
// spoofed Steam ID embedded keeps consumers that parse it happy.

use std::fmt::Write;

/// 224 bytes = 448 hex chars, like real tickets
pub const TICKET_LEN: usize = 224;

/// Where real tickets carry the Steam ID
pub const STEAM_ID_OFFSET: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeTicket {
    bytes: [u8; TICKET_LEN],
}

impl FakeTicket {
    /// Seeded fill from the low 32 bits of the ID, then the ID itself
    /// (little-endian) at `STEAM_ID_OFFSET`
    pub fn derive(steam_id: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(steam_id & 0xFFFF_FFFF);
        let mut bytes = [0u8; TICKET_LEN];
        rng.fill(&mut bytes);
        bytes[STEAM_ID_OFFSET..STEAM_ID_OFFSET + 8].copy_from_slice(&steam_id.to_le_bytes());
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The embedded Steam ID
    pub fn steam_id(&self) -> u64 {
        read_steam_id(self.as_bytes())
    }

    /// Upper-case hex, two chars per byte
    pub fn to_hex(&self) -> String {
        let mut hex = String::with_capacity(TICKET_LEN * 2);
        for b in self.as_bytes() {
            let _ = write!(hex, "{:02X}", b);
        }
        hex
    }
}

fn read_steam_id(bytes: &[u8]) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[STEAM_ID_OFFSET..STEAM_ID_OFFSET + 8]);
    u64::from_le_bytes(raw)
}

/// Recover the Steam ID from a hex-encoded ticket, as a ticket consumer would
pub fn steam_id_from_hex(hex: &str) -> Option<u64> {
    let start = STEAM_ID_OFFSET * 2;
    let field = hex.get(start..start + 16)?;
    let mut raw = [0u8; 8];
    for (i, byte) in raw.iter_mut().enumerate() {
        *byte = u8::from_str_radix(field.get(i * 2..i * 2 + 2)?, 16).ok()?;
    }
    Some(u64::from_le_bytes(raw))
}
