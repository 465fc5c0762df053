//! Doors, locks and keys.

use crate::primitive::{
    DoorColour, DoorFlags, PrimitiveData, PrimitiveId, PrimitiveKind, StagedPrimitive,
};
use crate::room::{AtomKind, GridPos, Room, StagedAtom};

/// A two-tile-tall door whose bottom tile stands on solid ground at
/// `pos`. Doors start closed unless flagged otherwise.
pub fn stage_door(pos: GridPos, colour: DoorColour, flags: DoorFlags) -> StagedPrimitive {
    let mut staged = StagedPrimitive::new(
        PrimitiveKind::Door,
        PrimitiveData::Door { colour, flags },
        pos,
    );
    staged.atoms.push(StagedAtom::new(pos, AtomKind::DoorBottom));
    staged
        .atoms
        .push(StagedAtom::new(pos.offset(0, -1), AtomKind::DoorTop));
    staged
}

/// The lock guarding a closed door, placed on the ground beside it.
pub fn stage_lock(pos: GridPos, colour: DoorColour) -> StagedPrimitive {
    let mut staged = StagedPrimitive::new(
        PrimitiveKind::DoorLock,
        PrimitiveData::Lock { colour },
        pos,
    );
    staged
        .atoms
        .push(StagedAtom::passable(pos, AtomKind::LockTile));
    staged
}

/// The key that satisfies a lock of the same colour.
pub fn stage_key(pos: GridPos, colour: DoorColour) -> StagedPrimitive {
    let mut staged = StagedPrimitive::new(
        PrimitiveKind::DoorKey,
        PrimitiveData::Key { colour },
        pos,
    );
    staged.atoms.push(StagedAtom::passable(pos, AtomKind::KeyTile));
    staged
}

/// Open a door: atoms swap to their open kinds, collision drops, the
/// OPEN flag sticks. Opening is one-way; doors never close again.
pub fn open_door(room: &mut Room, door: PrimitiveId) {
    let swaps: Vec<_> = {
        let p = room.primitive(door);
        debug_assert_eq!(p.kind, PrimitiveKind::Door);
        p.atoms
            .iter()
            .filter_map(|&id| {
                let open = match room.atom(id)?.kind {
                    AtomKind::DoorBottom => AtomKind::OpenDoorBottom,
                    AtomKind::DoorTop => AtomKind::OpenDoorTop,
                    _ => return None,
                };
                Some((id, open))
            })
            .collect()
    };
    for (id, open) in swaps {
        room.swap_atom_kind(id, open);
        room.set_atom_collidable(id, false);
    }
    if let PrimitiveData::Door { flags, .. } = &mut room.primitive_mut(door).data {
        flags.insert(DoorFlags::OPEN);
    }
}

/// Consume a lock/key pair and open its door. A key only fits a lock
/// of its own colour; on a mismatch nothing is consumed and the door
/// stays shut.
pub fn unlock_door(
    room: &mut Room,
    door: PrimitiveId,
    lock: PrimitiveId,
    key: PrimitiveId,
) -> bool {
    let PrimitiveData::Lock { colour: lock_colour } = room.primitive(lock).data else {
        return false;
    };
    let PrimitiveData::Key { colour: key_colour } = room.primitive(key).data else {
        return false;
    };
    if lock_colour != key_colour {
        return false;
    }
    room.remove_primitive(lock);
    room.remove_primitive(key);
    open_door(room, door);
    true
}
