//! Piece module - symbol tokens, the arena that owns them, and swaps
//!
//! Pieces live in a [`PieceArena`] and are addressed by a stable [`PieceId`].
//! The board grid stores ids, so moving a piece only rewrites its position in
//! the arena; every id handed out earlier keeps pointing at the same piece.
//! Removed slots are recycled with a bumped generation, which makes stale ids
//! resolve to `None` instead of to whichever piece took the slot.

use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::types::SymbolKind;

/// Stable handle to a piece in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PieceId {
    index: u32,
    generation: u32,
}

impl PieceId {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// A symbol-typed token at a board position
///
/// Two pieces are equal when they sit on the same cell; symbol and id are not
/// part of equality or hashing.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Piece {
    pub id: PieceId,
    pub column: usize,
    pub row: usize,
    pub kind: SymbolKind,
}

impl Piece {
    pub fn position(&self) -> (usize, usize) {
        (self.column, self.row)
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.column == other.column && self.row == other.row
    }
}

impl Eq for Piece {}

impl Hash for Piece {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position().hash(state);
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    piece: Option<Piece>,
}

/// Owner of every live piece
#[derive(Debug, Clone, Default)]
pub struct PieceArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl PieceArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a piece and return a copy carrying its id
    pub fn insert(&mut self, column: usize, row: usize, kind: SymbolKind) -> Piece {
        let (index, generation) = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.generation = slot.generation.wrapping_add(1);
                (index, slot.generation)
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    piece: None,
                });
                ((self.slots.len() - 1) as u32, 0)
            }
        };

        let piece = Piece {
            id: PieceId { index, generation },
            column,
            row,
            kind,
        };
        self.slots[index as usize].piece = Some(piece);
        self.live += 1;
        piece
    }

    /// Look up a live piece
    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.piece.as_ref())
    }

    /// Mutable access to a live piece
    pub fn get_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.piece.as_mut())
    }

    /// Release a piece; its id stops resolving
    pub fn remove(&mut self, id: PieceId) -> Option<Piece> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?;
        let piece = slot.piece.take()?;
        self.free.push(id.index);
        self.live -= 1;
        Some(piece)
    }

    /// Drop every piece. Old ids become stale.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.piece.take().is_some() {
                self.free.push(index as u32);
            }
        }
        self.live = 0;
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

/// An unordered pair of pieces to exchange
///
/// `Swap::new(a, b) == Swap::new(b, a)`; the hash agrees.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Swap {
    pub a: Piece,
    pub b: Piece,
}

impl Swap {
    pub fn new(a: Piece, b: Piece) -> Self {
        Self { a, b }
    }

    /// Whether the two pieces are orthogonal neighbors
    pub fn is_adjacent(&self) -> bool {
        self.a.column.abs_diff(self.b.column) + self.a.row.abs_diff(self.b.row) == 1
    }

    fn ordered(&self) -> ((usize, usize), (usize, usize)) {
        let (pa, pb) = (self.a.position(), self.b.position());
        if pa <= pb {
            (pa, pb)
        } else {
            (pb, pa)
        }
    }
}

impl PartialEq for Swap {
    fn eq(&self, other: &Self) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

impl Eq for Swap {}

impl Hash for Swap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordered().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_piece_equality_is_positional() {
        let mut arena = PieceArena::new();
        let a = arena.insert(2, 3, SymbolKind::One);
        let mut b = arena.insert(4, 4, SymbolKind::Two);
        assert_ne!(a, b);

        b.column = 2;
        b.row = 3;
        assert_eq!(a, b);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_arena_recycles_with_new_generation() {
        let mut arena = PieceArena::new();
        let first = arena.insert(0, 0, SymbolKind::Three);
        assert_eq!(arena.len(), 1);

        assert!(arena.remove(first.id).is_some());
        assert!(arena.get(first.id).is_none());
        assert!(arena.is_empty());

        let second = arena.insert(1, 1, SymbolKind::Four);
        assert_eq!(second.id.index(), first.id.index());
        assert_ne!(second.id.generation(), first.id.generation());
        assert!(arena.get(first.id).is_none());
        assert_eq!(arena.get(second.id).map(|p| p.kind), Some(SymbolKind::Four));
    }

    #[test]
    fn test_arena_clear_invalidates_ids() {
        let mut arena = PieceArena::new();
        let ids: Vec<_> = (0..4).map(|c| arena.insert(c, 0, SymbolKind::One).id).collect();
        arena.clear();
        assert!(arena.is_empty());
        assert!(ids.iter().all(|id| arena.get(*id).is_none()));
    }

    #[test]
    fn test_swap_is_symmetric() {
        let mut arena = PieceArena::new();
        let a = arena.insert(0, 0, SymbolKind::One);
        let b = arena.insert(1, 0, SymbolKind::Two);

        let ab = Swap::new(a, b);
        let ba = Swap::new(b, a);
        assert_eq!(ab, ba);
        assert!(ab.is_adjacent());

        let mut set = HashSet::new();
        set.insert(ab);
        assert!(set.contains(&ba));
    }

    #[test]
    fn test_swap_adjacency() {
        let mut arena = PieceArena::new();
        let a = arena.insert(0, 0, SymbolKind::One);
        let diagonal = arena.insert(1, 1, SymbolKind::Two);
        assert!(!Swap::new(a, diagonal).is_adjacent());
    }
}
