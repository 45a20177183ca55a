//! Controller service data.
//!
//! The controller service hands out a flat `f32` buffer with one fixed-size
//! group per slot (right hand, left hand, head). This module gives that buffer
//! a typed shape and defines the client seam the native library implements.

use crate::error::{Result, ShimError};

/// Floats per controller group
pub const GROUP_DATA_SIZE: usize = 30;
/// Number of groups (right, left, head)
pub const GROUP_COUNT: usize = 3;
/// Full buffer length expected from the service
pub const DATA_LEN: usize = GROUP_DATA_SIZE * GROUP_COUNT;

/// Field offsets inside a single group
pub mod index {
    pub const CONNECT_STATUS: usize = 0;
    pub const TYPE: usize = 1;
    pub const HANDEDNESS: usize = 2;
    pub const RECENTERED: usize = 3;
    pub const BATTERY: usize = 4;
    /// 4 floats, quaternion x y z w
    pub const ROTATION: usize = 5;
    /// 3 floats
    pub const POSITION: usize = 9;
    /// 3 floats
    pub const GATEWAY_POS: usize = 12;
    /// 2 floats, low and high 16 bits of the button mask
    pub const BUTTON_STATE: usize = 15;
    pub const TOUCH_STATE: usize = 17;
    /// 2 floats
    pub const TOUCH_POS: usize = 18;
    pub const TRIGGER_PROCESS: usize = 20;
    pub const GRIP_PROCESS: usize = 21;
    pub const RESERVED1: usize = 22;
    pub const RESERVED2: usize = 26;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectStatus {
    Disconnected = 0,
    Scanning = 1,
    Connecting = 2,
    Connected = 3,
    NoRecenter = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    I3vr = 0,
    Nolo6Dof = 1,
    Nolo3Dof = 2,
}

/// Slot a controller group describes. Also the group order in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Right = 0,
    Left = 1,
    Head = 2,
}

impl ConnectStatus {
    fn from_raw(raw: i32) -> Option<Self> {
        Some(match raw {
            0 => Self::Disconnected,
            1 => Self::Scanning,
            2 => Self::Connecting,
            3 => Self::Connected,
            4 => Self::NoRecenter,
            _ => return None,
        })
    }
}

impl ControllerKind {
    fn from_raw(raw: i32) -> Option<Self> {
        Some(match raw {
            0 => Self::I3vr,
            1 => Self::Nolo6Dof,
            2 => Self::Nolo3Dof,
            _ => return None,
        })
    }
}

impl Handedness {
    pub const ALL: [Handedness; GROUP_COUNT] = [Self::Right, Self::Left, Self::Head];

    fn from_raw(raw: i32) -> Option<Self> {
        Self::ALL.get(usize::try_from(raw).ok()?).copied()
    }
}

/// Controller button bit mask
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Buttons(pub u32);

impl Buttons {
    pub const NONE: Self = Self(0);
    // touch pad
    pub const UP: Self = Self(0x0000_0001);
    pub const DOWN: Self = Self(0x0000_0002);
    pub const LEFT: Self = Self(0x0000_0004);
    pub const RIGHT: Self = Self(0x0000_0008);
    // system
    pub const ENTER: Self = Self(0x0000_0010);
    pub const HOME: Self = Self(0x0000_0020);
    pub const MENU: Self = Self(0x0000_0040);
    pub const BACK: Self = Self(0x0000_0080);
    pub const VOLUME_UP: Self = Self(0x0000_0100);
    pub const VOLUME_DOWN: Self = Self(0x0000_0200);
    // other
    pub const GRIP: Self = Self(0x0000_0400);
    pub const TRIGGER: Self = Self(0x0000_0800);

    pub fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for Buttons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControllerGroup {
    pub status: ConnectStatus,
    pub kind: ControllerKind,
    pub handedness: Handedness,
    pub recentered: bool,
    pub battery: f32,
    pub rotation: [f32; 4],
    pub position: [f32; 3],
    pub gateway_position: [f32; 3],
    pub buttons: Buttons,
    pub touching: bool,
    pub touch_position: [f32; 2],
    pub trigger: f32,
    pub grip: f32,
}

impl ControllerGroup {
    /// Decodes one group. A disconnected slot yields `None` without looking at
    /// the remaining fields, the service leaves them stale.
    pub fn decode(group: &[f32]) -> Result<Option<Self>> {
        if group.len() < GROUP_DATA_SIZE {
            return Err(ShimError::ControllerData(format!(
                "group has {} values, expected {}",
                group.len(),
                GROUP_DATA_SIZE
            )));
        }

        let status = ConnectStatus::from_raw(as_int(group[index::CONNECT_STATUS])?)
            .ok_or_else(|| bad_value("connect status", group[index::CONNECT_STATUS]))?;
        if status == ConnectStatus::Disconnected {
            return Ok(None);
        }

        let kind = ControllerKind::from_raw(as_int(group[index::TYPE])?)
            .ok_or_else(|| bad_value("controller type", group[index::TYPE]))?;
        let handedness = Handedness::from_raw(as_int(group[index::HANDEDNESS])?)
            .ok_or_else(|| bad_value("handedness", group[index::HANDEDNESS]))?;

        let low = button_word(group[index::BUTTON_STATE])?;
        let high = button_word(group[index::BUTTON_STATE + 1])?;

        Ok(Some(Self {
            status,
            kind,
            handedness,
            recentered: group[index::RECENTERED] != 0.0,
            battery: group[index::BATTERY],
            rotation: copy_array(group, index::ROTATION),
            position: copy_array(group, index::POSITION),
            gateway_position: copy_array(group, index::GATEWAY_POS),
            buttons: Buttons(low | (high << 16)),
            touching: group[index::TOUCH_STATE] != 0.0,
            touch_position: copy_array(group, index::TOUCH_POS),
            trigger: group[index::TRIGGER_PROCESS],
            grip: group[index::GRIP_PROCESS],
        }))
    }

    pub fn is_connected(&self) -> bool {
        matches!(
            self.status,
            ConnectStatus::Connected | ConnectStatus::NoRecenter
        )
    }
}

fn as_int(value: f32) -> Result<i32> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(bad_value("integer field", value));
    }
    Ok(value as i32)
}

/// One half of the button mask; must fit in 16 bits.
fn button_word(value: f32) -> Result<u32> {
    u16::try_from(as_int(value)?)
        .map(u32::from)
        .map_err(|_| bad_value("button state", value))
}

fn bad_value(field: &str, value: f32) -> ShimError {
    ShimError::ControllerData(format!("invalid {}: {}", field, value))
}

fn copy_array<const N: usize>(group: &[f32], start: usize) -> [f32; N] {
    let mut out = [0.0; N];
    out.copy_from_slice(&group[start..start + N]);
    out
}

/// Decoded controller buffer, one optional group per slot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControllerSnapshot {
    groups: [Option<ControllerGroup>; GROUP_COUNT],
}

impl ControllerSnapshot {
    pub fn decode(data: &[f32]) -> Result<Self> {
        if data.len() < DATA_LEN {
            return Err(ShimError::ControllerData(format!(
                "buffer has {} values, expected {}",
                data.len(),
                DATA_LEN
            )));
        }

        let mut snapshot = Self::default();
        for (slot, chunk) in snapshot
            .groups
            .iter_mut()
            .zip(data.chunks_exact(GROUP_DATA_SIZE))
        {
            *slot = ControllerGroup::decode(chunk)?;
        }
        Ok(snapshot)
    }

    /// Connects if needed, reads the service buffer and decodes it.
    pub fn poll<C: ControllerClient + ?Sized>(client: &mut C) -> Result<Self> {
        if !client.is_connected() {
            client.connect()?;
        }
        let mut data = [0.0f32; DATA_LEN];
        let len = client.read(&mut data)?;
        Self::decode(&data[..len.min(DATA_LEN)])
    }

    pub fn get(&self, slot: Handedness) -> Option<&ControllerGroup> {
        self.groups[slot as usize].as_ref()
    }

    pub fn connected(&self) -> impl Iterator<Item = &ControllerGroup> {
        self.groups.iter().flatten().filter(|g| g.is_connected())
    }
}

/// Client side of the controller service.
///
/// The native library provides the implementation; it owns the connection and
/// disconnects when the engine shuts down.
pub trait ControllerClient {
    fn connect(&mut self) -> Result<()>;
    fn disconnect(&mut self) -> Result<()>;
    fn is_connected(&self) -> bool;
    /// Fills `data` and returns how many values were written.
    fn read(&mut self, data: &mut [f32]) -> Result<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected_group(hand: Handedness) -> [f32; GROUP_DATA_SIZE] {
        let mut g = [0.0; GROUP_DATA_SIZE];
        g[index::CONNECT_STATUS] = ConnectStatus::Connected as i32 as f32;
        g[index::TYPE] = ControllerKind::Nolo6Dof as i32 as f32;
        g[index::HANDEDNESS] = hand as i32 as f32;
        g[index::BATTERY] = 80.0;
        g[index::ROTATION..index::ROTATION + 4].copy_from_slice(&[0.0, 0.0, 0.0, 1.0]);
        g[index::POSITION..index::POSITION + 3].copy_from_slice(&[0.1, 1.5, -0.3]);
        g[index::BUTTON_STATE] = (Buttons::TRIGGER | Buttons::BACK).0 as f32;
        g[index::TOUCH_STATE] = 1.0;
        g[index::TOUCH_POS..index::TOUCH_POS + 2].copy_from_slice(&[0.25, 0.75]);
        g[index::TRIGGER_PROCESS] = 0.5;
        g
    }

    #[test]
    fn decodes_connected_and_empty_slots() {
        let mut data = vec![0.0; DATA_LEN];
        data[..GROUP_DATA_SIZE].copy_from_slice(&connected_group(Handedness::Right));

        let snapshot = ControllerSnapshot::decode(&data).unwrap();
        let right = snapshot.get(Handedness::Right).unwrap();
        assert_eq!(right.kind, ControllerKind::Nolo6Dof);
        assert_eq!(right.handedness, Handedness::Right);
        assert_eq!(right.position, [0.1, 1.5, -0.3]);
        assert_eq!(right.rotation, [0.0, 0.0, 0.0, 1.0]);
        assert!(right.buttons.contains(Buttons::TRIGGER));
        assert!(right.buttons.contains(Buttons::BACK));
        assert!(!right.buttons.contains(Buttons::HOME));
        assert!(right.touching);
        assert_eq!(right.touch_position, [0.25, 0.75]);
        assert_eq!(right.trigger, 0.5);

        assert!(snapshot.get(Handedness::Left).is_none());
        assert!(snapshot.get(Handedness::Head).is_none());
        assert_eq!(snapshot.connected().count(), 1);
    }

    #[test]
    fn high_button_bits_use_second_value() {
        let mut g = connected_group(Handedness::Left);
        g[index::BUTTON_STATE] = 0.0;
        g[index::BUTTON_STATE + 1] = 1.0;
        let group = ControllerGroup::decode(&g).unwrap().unwrap();
        assert_eq!(group.buttons, Buttons(0x1_0000));
    }

    #[test]
    fn rejects_out_of_range_button_words() {
        let mut g = connected_group(Handedness::Right);
        g[index::BUTTON_STATE] = -1.0;
        assert!(matches!(
            ControllerGroup::decode(&g),
            Err(ShimError::ControllerData(_))
        ));

        let mut g = connected_group(Handedness::Right);
        g[index::BUTTON_STATE] = 65536.0 + 2048.0;
        assert!(matches!(
            ControllerGroup::decode(&g),
            Err(ShimError::ControllerData(_))
        ));

        let mut g = connected_group(Handedness::Right);
        g[index::BUTTON_STATE] = 0.0;
        g[index::BUTTON_STATE + 1] = 65535.0;
        let group = ControllerGroup::decode(&g).unwrap().unwrap();
        assert_eq!(group.buttons, Buttons(0xffff_0000));
    }

    #[test]
    fn rejects_short_buffer() {
        let data = vec![0.0; DATA_LEN - 1];
        assert!(matches!(
            ControllerSnapshot::decode(&data),
            Err(ShimError::ControllerData(_))
        ));
    }

    #[test]
    fn rejects_unknown_enum_values() {
        let mut g = connected_group(Handedness::Head);
        g[index::TYPE] = 7.0;
        assert!(ControllerGroup::decode(&g).is_err());

        let mut g = connected_group(Handedness::Head);
        g[index::CONNECT_STATUS] = 2.5;
        assert!(ControllerGroup::decode(&g).is_err());
    }

    struct FakeService {
        connected: bool,
        connects: usize,
        data: Vec<f32>,
    }

    impl ControllerClient for FakeService {
        fn connect(&mut self) -> Result<()> {
            self.connects += 1;
            self.connected = true;
            Ok(())
        }

        fn disconnect(&mut self) -> Result<()> {
            self.connected = false;
            Ok(())
        }

        fn is_connected(&self) -> bool {
            self.connected
        }

        fn read(&mut self, data: &mut [f32]) -> Result<usize> {
            let n = self.data.len().min(data.len());
            data[..n].copy_from_slice(&self.data[..n]);
            Ok(n)
        }
    }

    #[test]
    fn poll_connects_once() {
        let mut data = vec![0.0; DATA_LEN];
        data[GROUP_DATA_SIZE * 2..].copy_from_slice(&connected_group(Handedness::Head));
        let mut service = FakeService {
            connected: false,
            connects: 0,
            data,
        };

        let first = ControllerSnapshot::poll(&mut service).unwrap();
        let second = ControllerSnapshot::poll(&mut service).unwrap();
        assert_eq!(service.connects, 1);
        assert_eq!(first, second);
        assert!(first.get(Handedness::Head).is_some());
    }
}
