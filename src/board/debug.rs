use super::piece_list::PieceList;
use super::{Bitboard, Board, Color, Piece, Square};

#[cfg(debug_assertions)]
impl Board {
    /// Rebuild occupancy sets, piece lists and hash from the mailbox and
    /// panic if anything disagrees with the incremental state.
    pub(crate) fn assert_consistent(&self) {
        let mut pieces = [[Bitboard::EMPTY; 6]; 2];
        let mut lists: [[PieceList; 6]; 2] = Default::default();
        for (idx, slot) in self.mailbox.iter().enumerate() {
            if let Some((color, piece)) = *slot {
                let sq = Square(idx as u8);
                pieces[color.index()][piece.index()] |= Bitboard::from_square(sq);
                lists[color.index()][piece.index()].add(sq);
            }
        }

        let mut all = Bitboard::EMPTY;
        for color in Color::BOTH {
            let mut by_color = Bitboard::EMPTY;
            for piece in Piece::ALL {
                let (c, p) = (color.index(), piece.index());
                assert_eq!(
                    self.pieces[c][p], pieces[c][p],
                    "{color} {piece} bitboard out of sync with mailbox"
                );
                assert!(
                    self.piece_lists[c][p].same_squares(&lists[c][p]),
                    "{color} {piece} piece list out of sync with mailbox"
                );
                by_color |= pieces[c][p];
            }
            assert_eq!(self.occupied[color.index()], by_color);
            all |= by_color;
        }
        assert_eq!(self.all_occupied, all);
        assert_eq!(self.hash.key(), self.compute_hash(), "hash out of sync");
    }
}
