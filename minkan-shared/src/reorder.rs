/// Drag-and-drop reorder engine
///
/// Pure, framework-independent state container for board reordering. The
/// UI (or an API client) holds a [`BoardSnapshot`] and feeds it one
/// [`DragEvent`] per completed drag gesture; [`BoardSnapshot::apply`] is
/// the single reducer-style update function. It mutates the snapshot
/// optimistically and returns the exact set of placements the server must
/// persist.
///
/// # Semantics
///
/// - Dropping an item back where it came from is a no-op: the snapshot is
///   untouched and nothing needs persisting.
/// - Moving a list splices it to the destination index and renumbers every
///   list's `order` to its new positional index (0-based). All lists are
///   submitted.
/// - Moving a card within one list splices and renumbers that list's cards
///   (0-based). That list's cards are submitted.
/// - Moving a card across lists removes it from the source, retargets its
///   `list_id`, inserts it at the destination index, and renumbers BOTH
///   lists (0-based). The union of both lists' cards is submitted, so the
///   source list's renumbering is persisted together with the
///   destination's rather than being left stale.
///
/// # Example
///
/// ```
/// use minkan_shared::reorder::{BoardSnapshot, CardSnapshot, DragEvent, ListSnapshot, ReorderOutcome};
/// use uuid::Uuid;
///
/// let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
/// let card = Uuid::new_v4();
///
/// let mut board = BoardSnapshot {
///     lists: vec![
///         ListSnapshot { id: a, order: 0, cards: vec![CardSnapshot { id: card, list_id: a, order: 0 }] },
///         ListSnapshot { id: b, order: 1, cards: vec![] },
///     ],
/// };
///
/// let outcome = board
///     .apply(DragEvent::CardMoved { source_list: a, dest_list: b, from: 0, to: 0 })
///     .unwrap();
///
/// match outcome {
///     ReorderOutcome::CardsReordered(placements) => {
///         assert_eq!(placements.len(), 1);
///         assert_eq!(placements[0].list_id, b);
///     }
///     _ => unreachable!(),
/// }
/// ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Card as seen by the reorder engine: identity, owning list, sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSnapshot {
    /// Card ID
    pub id: Uuid,

    /// List the card currently belongs to
    pub list_id: Uuid,

    /// Sort position within the list
    pub order: i32,
}

/// List as seen by the reorder engine, with its cards in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSnapshot {
    /// List ID
    pub id: Uuid,

    /// Sort position within the board
    pub order: i32,

    /// Cards in display order
    pub cards: Vec<CardSnapshot>,
}

/// In-memory view of a board's lists and cards in display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Lists in display order
    pub lists: Vec<ListSnapshot>,
}

/// A list's new position, to be persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPlacement {
    pub id: Uuid,
    pub order: i32,
}

/// A card's new position (and possibly new list), to be persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPlacement {
    pub id: Uuid,
    pub list_id: Uuid,
    pub order: i32,
}

/// One completed drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    /// A list was dragged from one position to another within the board
    ListMoved { from: usize, to: usize },

    /// A card was dragged; source and destination list may be the same
    CardMoved {
        source_list: Uuid,
        dest_list: Uuid,
        from: usize,
        to: usize,
    },
}

/// What changed, and the subset that must be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// Source equals destination: nothing changed, nothing to persist
    Unchanged,

    /// All of the board's lists, with recomputed orders
    ListsReordered(Vec<ListPlacement>),

    /// The affected list's cards, or for a cross-list move the union of
    /// both lists' cards, with recomputed orders
    CardsReordered(Vec<CardPlacement>),
}

/// Error applying a drag event; the snapshot is left unchanged
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReorderError {
    /// The event referenced a list that is not on this board
    #[error("unknown list: {0}")]
    UnknownList(Uuid),

    /// An index did not fit the container it refers to
    #[error("index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

impl BoardSnapshot {
    /// Applies one drag event, mutating the snapshot and returning the
    /// placements to persist
    ///
    /// On error the snapshot is guaranteed unchanged: all index and list
    /// lookups are validated before any mutation.
    pub fn apply(&mut self, event: DragEvent) -> Result<ReorderOutcome, ReorderError> {
        match event {
            DragEvent::ListMoved { from, to } => self.move_list(from, to),
            DragEvent::CardMoved {
                source_list,
                dest_list,
                from,
                to,
            } => {
                if source_list == dest_list {
                    self.move_card_within(source_list, from, to)
                } else {
                    self.move_card_across(source_list, dest_list, from, to)
                }
            }
        }
    }

    fn move_list(&mut self, from: usize, to: usize) -> Result<ReorderOutcome, ReorderError> {
        let len = self.lists.len();
        check_index(from, len)?;
        check_index(to, len)?;

        if from == to {
            return Ok(ReorderOutcome::Unchanged);
        }

        let moved = self.lists.remove(from);
        self.lists.insert(to, moved);
        renumber_lists(&mut self.lists);

        Ok(ReorderOutcome::ListsReordered(
            self.lists
                .iter()
                .map(|l| ListPlacement {
                    id: l.id,
                    order: l.order,
                })
                .collect(),
        ))
    }

    fn move_card_within(
        &mut self,
        list_id: Uuid,
        from: usize,
        to: usize,
    ) -> Result<ReorderOutcome, ReorderError> {
        let list = self
            .lists
            .iter_mut()
            .find(|l| l.id == list_id)
            .ok_or(ReorderError::UnknownList(list_id))?;

        let len = list.cards.len();
        check_index(from, len)?;
        check_index(to, len)?;

        if from == to {
            return Ok(ReorderOutcome::Unchanged);
        }

        let moved = list.cards.remove(from);
        list.cards.insert(to, moved);
        renumber_cards(&mut list.cards);

        Ok(ReorderOutcome::CardsReordered(placements(&list.cards)))
    }

    fn move_card_across(
        &mut self,
        source_list: Uuid,
        dest_list: Uuid,
        from: usize,
        to: usize,
    ) -> Result<ReorderOutcome, ReorderError> {
        let source_idx = self.index_of(source_list)?;
        let dest_idx = self.index_of(dest_list)?;

        check_index(from, self.lists[source_idx].cards.len())?;
        // Insertion into the destination may append at the end.
        let dest_len = self.lists[dest_idx].cards.len();
        if to > dest_len {
            return Err(ReorderError::IndexOutOfRange {
                index: to,
                len: dest_len,
            });
        }

        let mut moved = self.lists[source_idx].cards.remove(from);
        moved.list_id = dest_list;
        self.lists[dest_idx].cards.insert(to, moved);

        renumber_cards(&mut self.lists[source_idx].cards);
        renumber_cards(&mut self.lists[dest_idx].cards);

        // Both sides go to the server so the source list's renumbering is
        // persisted atomically with the destination's.
        let mut all = placements(&self.lists[source_idx].cards);
        all.extend(placements(&self.lists[dest_idx].cards));

        Ok(ReorderOutcome::CardsReordered(all))
    }

    fn index_of(&self, list_id: Uuid) -> Result<usize, ReorderError> {
        self.lists
            .iter()
            .position(|l| l.id == list_id)
            .ok_or(ReorderError::UnknownList(list_id))
    }
}

fn check_index(index: usize, len: usize) -> Result<(), ReorderError> {
    if index < len {
        Ok(())
    } else {
        Err(ReorderError::IndexOutOfRange { index, len })
    }
}

fn renumber_lists(lists: &mut [ListSnapshot]) {
    for (idx, list) in lists.iter_mut().enumerate() {
        list.order = idx as i32;
    }
}

fn renumber_cards(cards: &mut [CardSnapshot]) {
    for (idx, card) in cards.iter_mut().enumerate() {
        card.order = idx as i32;
    }
}

fn placements(cards: &[CardSnapshot]) -> Vec<CardPlacement> {
    cards
        .iter()
        .map(|c| CardPlacement {
            id: c.id,
            list_id: c.list_id,
            order: c.order,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(list_id: Uuid, order: i32) -> CardSnapshot {
        CardSnapshot {
            id: Uuid::new_v4(),
            list_id,
            order,
        }
    }

    /// Board with two lists: 3 cards in the first, 2 in the second.
    fn sample_board() -> BoardSnapshot {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        BoardSnapshot {
            lists: vec![
                ListSnapshot {
                    id: a,
                    order: 0,
                    cards: vec![card(a, 0), card(a, 1), card(a, 2)],
                },
                ListSnapshot {
                    id: b,
                    order: 1,
                    cards: vec![card(b, 0), card(b, 1)],
                },
            ],
        }
    }

    /// Orders are exactly 0..n-1 in display order: dense, no duplicates.
    fn assert_dense(cards: &[CardSnapshot]) {
        for (idx, card) in cards.iter().enumerate() {
            assert_eq!(card.order, idx as i32, "order not dense at index {}", idx);
        }
    }

    #[test]
    fn test_list_move_same_position_is_noop() {
        let mut board = sample_board();
        let before = board.clone();

        let outcome = board.apply(DragEvent::ListMoved { from: 1, to: 1 }).unwrap();

        assert_eq!(outcome, ReorderOutcome::Unchanged);
        assert_eq!(board, before);
    }

    #[test]
    fn test_card_move_same_position_is_noop() {
        let mut board = sample_board();
        let list = board.lists[0].id;
        let before = board.clone();

        let outcome = board
            .apply(DragEvent::CardMoved {
                source_list: list,
                dest_list: list,
                from: 2,
                to: 2,
            })
            .unwrap();

        assert_eq!(outcome, ReorderOutcome::Unchanged);
        assert_eq!(board, before);
    }

    #[test]
    fn test_list_move_renumbers_all_lists() {
        let mut board = BoardSnapshot {
            lists: (0..4)
                .map(|i| ListSnapshot {
                    id: Uuid::new_v4(),
                    order: i,
                    cards: vec![],
                })
                .collect(),
        };
        let ids: Vec<Uuid> = board.lists.iter().map(|l| l.id).collect();

        let outcome = board.apply(DragEvent::ListMoved { from: 3, to: 0 }).unwrap();

        // Last list is now first; everything renumbered 0..n-1.
        let new_ids: Vec<Uuid> = board.lists.iter().map(|l| l.id).collect();
        assert_eq!(new_ids, vec![ids[3], ids[0], ids[1], ids[2]]);
        for (idx, list) in board.lists.iter().enumerate() {
            assert_eq!(list.order, idx as i32);
        }

        // The full collection is submitted.
        match outcome {
            ReorderOutcome::ListsReordered(placements) => {
                assert_eq!(placements.len(), 4);
                assert_eq!(placements[0].id, ids[3]);
                assert_eq!(placements[0].order, 0);
            }
            other => panic!("expected ListsReordered, got {:?}", other),
        }
    }

    #[test]
    fn test_same_list_card_move_is_dense_without_duplicates() {
        let mut board = sample_board();
        let list = board.lists[0].id;
        let moved_id = board.lists[0].cards[0].id;

        let outcome = board
            .apply(DragEvent::CardMoved {
                source_list: list,
                dest_list: list,
                from: 0,
                to: 2,
            })
            .unwrap();

        assert_dense(&board.lists[0].cards);
        assert_eq!(board.lists[0].cards[2].id, moved_id);

        match outcome {
            ReorderOutcome::CardsReordered(placements) => {
                assert_eq!(placements.len(), 3);
                // Only the affected list is submitted.
                assert!(placements.iter().all(|p| p.list_id == list));
            }
            other => panic!("expected CardsReordered, got {:?}", other),
        }
    }

    #[test]
    fn test_cross_list_move_retargets_card_and_renumbers_both_sides() {
        let mut board = sample_board();
        let source = board.lists[0].id;
        let dest = board.lists[1].id;
        let moved_id = board.lists[0].cards[1].id;

        let outcome = board
            .apply(DragEvent::CardMoved {
                source_list: source,
                dest_list: dest,
                from: 1,
                to: 1,
            })
            .unwrap();

        // Card now lives in the destination list at the drop index.
        assert_eq!(board.lists[0].cards.len(), 2);
        assert_eq!(board.lists[1].cards.len(), 3);
        assert_eq!(board.lists[1].cards[1].id, moved_id);
        assert_eq!(board.lists[1].cards[1].list_id, dest);

        // Both containers end up dense and 0-based.
        assert_dense(&board.lists[0].cards);
        assert_dense(&board.lists[1].cards);

        // The union of both lists is submitted, source included.
        match outcome {
            ReorderOutcome::CardsReordered(placements) => {
                assert_eq!(placements.len(), 5);
                assert_eq!(placements.iter().filter(|p| p.list_id == source).count(), 2);
                assert_eq!(placements.iter().filter(|p| p.list_id == dest).count(), 3);
            }
            other => panic!("expected CardsReordered, got {:?}", other),
        }
    }

    #[test]
    fn test_cross_list_move_appends_at_end() {
        let mut board = sample_board();
        let source = board.lists[0].id;
        let dest = board.lists[1].id;
        let moved_id = board.lists[0].cards[0].id;

        // to == destination length appends.
        board
            .apply(DragEvent::CardMoved {
                source_list: source,
                dest_list: dest,
                from: 0,
                to: 2,
            })
            .unwrap();

        assert_eq!(board.lists[1].cards.last().unwrap().id, moved_id);
        assert_dense(&board.lists[1].cards);
    }

    #[test]
    fn test_cross_list_move_to_empty_list() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut board = BoardSnapshot {
            lists: vec![
                ListSnapshot {
                    id: a,
                    order: 0,
                    cards: vec![card(a, 0)],
                },
                ListSnapshot {
                    id: b,
                    order: 1,
                    cards: vec![],
                },
            ],
        };

        board
            .apply(DragEvent::CardMoved {
                source_list: a,
                dest_list: b,
                from: 0,
                to: 0,
            })
            .unwrap();

        assert!(board.lists[0].cards.is_empty());
        assert_eq!(board.lists[1].cards.len(), 1);
        assert_eq!(board.lists[1].cards[0].order, 0);
        assert_eq!(board.lists[1].cards[0].list_id, b);
    }

    #[test]
    fn test_unknown_list_leaves_snapshot_unchanged() {
        let mut board = sample_board();
        let before = board.clone();
        let stranger = Uuid::new_v4();

        let err = board
            .apply(DragEvent::CardMoved {
                source_list: stranger,
                dest_list: board.lists[1].id,
                from: 0,
                to: 0,
            })
            .unwrap_err();

        assert_eq!(err, ReorderError::UnknownList(stranger));
        assert_eq!(board, before);
    }

    #[test]
    fn test_out_of_range_index_leaves_snapshot_unchanged() {
        let mut board = sample_board();
        let before = board.clone();
        let source = board.lists[0].id;
        let dest = board.lists[1].id;

        let err = board
            .apply(DragEvent::CardMoved {
                source_list: source,
                dest_list: dest,
                from: 9,
                to: 0,
            })
            .unwrap_err();

        assert_eq!(err, ReorderError::IndexOutOfRange { index: 9, len: 3 });
        assert_eq!(board, before);

        // Destination insertion index past the end is also rejected.
        let err = board
            .apply(DragEvent::CardMoved {
                source_list: source,
                dest_list: dest,
                from: 0,
                to: 3,
            })
            .unwrap_err();

        assert_eq!(err, ReorderError::IndexOutOfRange { index: 3, len: 2 });
        assert_eq!(board, before);
    }

    #[test]
    fn test_list_move_out_of_range() {
        let mut board = sample_board();
        let before = board.clone();

        let err = board.apply(DragEvent::ListMoved { from: 0, to: 2 }).unwrap_err();

        assert_eq!(err, ReorderError::IndexOutOfRange { index: 2, len: 2 });
        assert_eq!(board, before);
    }
}
