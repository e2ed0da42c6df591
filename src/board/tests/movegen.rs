//! Legal move generator checked against a slow reference.
//!
//! The reference works on a plain mailbox: it enumerates pseudo-legal moves
//! square by square, plays each on a copy and keeps it only if its own king
//! is not attacked afterwards. It shares no code with the bitboard
//! generator beyond reading pieces off the board.

use std::collections::BTreeSet;

use crate::board::{Board, CastleSide, Color, Piece, Square};
use rand::prelude::*;

type Grid = [Option<(Color, Piece)>; 64];

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];
const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];
const ROOK_RAYS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_RAYS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

fn idx(rank: i8, file: i8) -> Option<usize> {
    ((0..8).contains(&rank) && (0..8).contains(&file)).then(|| (rank * 8 + file) as usize)
}

fn at(grid: &Grid, rank: i8, file: i8) -> Option<(Color, Piece)> {
    idx(rank, file).and_then(|i| grid[i])
}

fn name(i: usize) -> String {
    Square(i as u8).to_string()
}

fn attacked(grid: &Grid, rank: i8, file: i8, by: Color) -> bool {
    let forward = if by == Color::White { 1 } else { -1 };
    for df in [-1, 1] {
        if at(grid, rank - forward, file + df) == Some((by, Piece::Pawn)) {
            return true;
        }
    }
    for (dr, df) in KNIGHT_STEPS {
        if at(grid, rank + dr, file + df) == Some((by, Piece::Knight)) {
            return true;
        }
    }
    for (dr, df) in KING_STEPS {
        if at(grid, rank + dr, file + df) == Some((by, Piece::King)) {
            return true;
        }
    }
    for (rays, slider) in [(ROOK_RAYS, Piece::Rook), (BISHOP_RAYS, Piece::Bishop)] {
        for (dr, df) in rays {
            let (mut r, mut f) = (rank + dr, file + df);
            while idx(r, f).is_some() {
                if let Some((color, piece)) = at(grid, r, f) {
                    if color == by && (piece == slider || piece == Piece::Queen) {
                        return true;
                    }
                    break;
                }
                r += dr;
                f += df;
            }
        }
    }
    false
}

struct Candidate {
    from: usize,
    to: usize,
    promotion: Option<Piece>,
    en_passant: bool,
    castle_rook: Option<(usize, usize)>,
}

impl Candidate {
    fn plain(from: usize, to: usize) -> Self {
        Candidate {
            from,
            to,
            promotion: None,
            en_passant: false,
            castle_rook: None,
        }
    }
}

fn king_is_safe(grid: &Grid, us: Color) -> bool {
    let Some(king) = (0..64).find(|&i| grid[i] == Some((us, Piece::King))) else {
        return false;
    };
    !attacked(grid, (king / 8) as i8, (king % 8) as i8, us.opponent())
}

fn pseudo_legal(board: &Board, grid: &Grid, us: Color) -> Vec<Candidate> {
    let mut out = Vec::new();
    let free_or_enemy = |r: i8, f: i8| match idx(r, f) {
        None => false,
        Some(i) => grid[i].map_or(true, |(c, _)| c != us),
    };

    for from in 0..64 {
        let Some((color, piece)) = grid[from] else {
            continue;
        };
        if color != us {
            continue;
        }
        let (rank, file) = ((from / 8) as i8, (from % 8) as i8);
        match piece {
            Piece::Pawn => {
                let forward = if us == Color::White { 1 } else { -1 };
                let start_rank = if us == Color::White { 1 } else { 6 };
                let last_rank = if us == Color::White { 7 } else { 0 };
                let mut targets = Vec::new();
                if let Some(one) = idx(rank + forward, file) {
                    if grid[one].is_none() {
                        targets.push((one, false));
                        if rank == start_rank {
                            if let Some(two) = idx(rank + 2 * forward, file) {
                                if grid[two].is_none() {
                                    targets.push((two, false));
                                }
                            }
                        }
                    }
                }
                for df in [-1, 1] {
                    let Some(to) = idx(rank + forward, file + df) else {
                        continue;
                    };
                    if matches!(grid[to], Some((c, _)) if c != us) {
                        targets.push((to, false));
                    } else if board.en_passant_target() == Some(Square(to as u8)) {
                        targets.push((to, true));
                    }
                }
                for (to, en_passant) in targets {
                    if (to / 8) as i8 == last_rank {
                        for promo in [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight] {
                            out.push(Candidate {
                                promotion: Some(promo),
                                ..Candidate::plain(from, to)
                            });
                        }
                    } else {
                        out.push(Candidate {
                            en_passant,
                            ..Candidate::plain(from, to)
                        });
                    }
                }
            }
            Piece::Knight | Piece::King => {
                let steps = if piece == Piece::Knight {
                    KNIGHT_STEPS
                } else {
                    KING_STEPS
                };
                for (dr, df) in steps {
                    if free_or_enemy(rank + dr, file + df) {
                        if let Some(to) = idx(rank + dr, file + df) {
                            out.push(Candidate::plain(from, to));
                        }
                    }
                }
            }
            Piece::Bishop | Piece::Rook | Piece::Queen => {
                let mut rays = Vec::new();
                if piece != Piece::Bishop {
                    rays.extend(ROOK_RAYS);
                }
                if piece != Piece::Rook {
                    rays.extend(BISHOP_RAYS);
                }
                for (dr, df) in rays {
                    let (mut r, mut f) = (rank + dr, file + df);
                    while let Some(to) = idx(r, f) {
                        match grid[to] {
                            None => out.push(Candidate::plain(from, to)),
                            Some((c, _)) => {
                                if c != us {
                                    out.push(Candidate::plain(from, to));
                                }
                                break;
                            }
                        }
                        r += dr;
                        f += df;
                    }
                }
            }
        }
    }

    // castling: rights, rook at home, empty path, king never crosses an attack
    let back = if us == Color::White { 0 } else { 7 };
    let them = us.opponent();
    for kingside in [true, false] {
        let side = CastleSide::new(us, kingside);
        if !board.castling_rights().has(side) {
            continue;
        }
        let king_from = back * 8 + 4;
        if grid[king_from as usize] != Some((us, Piece::King)) {
            continue;
        }
        let (rook_file, empty_files, safe_files, king_to, rook_to): (i8, &[i8], &[i8], i8, i8) =
            if kingside {
                (7, &[5, 6], &[4, 5, 6], 6, 5)
            } else {
                (0, &[1, 2, 3], &[4, 3, 2], 2, 3)
            };
        if at(grid, back, rook_file) != Some((us, Piece::Rook)) {
            continue;
        }
        if empty_files.iter().any(|&f| at(grid, back, f).is_some()) {
            continue;
        }
        if safe_files.iter().any(|&f| attacked(grid, back, f, them)) {
            continue;
        }
        let to = (back * 8 + king_to) as usize;
        out.push(Candidate {
            castle_rook: Some(((back * 8 + rook_file) as usize, (back * 8 + rook_to) as usize)),
            ..Candidate::plain(king_from as usize, to)
        });
    }
    out
}

fn reference_moves(board: &Board) -> BTreeSet<String> {
    let mut grid: Grid = [None; 64];
    for (i, cell) in grid.iter_mut().enumerate() {
        *cell = board.piece_at(Square(i as u8));
    }
    let us = board.side_to_move();

    pseudo_legal(board, &grid, us)
        .into_iter()
        .filter(|c| {
            let mut after = grid;
            let moving = after[c.from].take();
            after[c.to] = c.promotion.map(|p| (us, p)).or(moving);
            if c.en_passant {
                let captured = if us == Color::White { c.to - 8 } else { c.to + 8 };
                after[captured] = None;
            }
            if let Some((rook_from, rook_to)) = c.castle_rook {
                after[rook_to] = after[rook_from].take();
            }
            king_is_safe(&after, us)
        })
        .map(|c| {
            let promo = c.promotion.map(|p| p.to_char().to_ascii_lowercase());
            format!("{}{}{}", name(c.from), name(c.to), promo.map(String::from).unwrap_or_default())
        })
        .collect()
}

fn generated_moves(board: &Board) -> BTreeSet<String> {
    board.generate_moves().iter().map(ToString::to_string).collect()
}

const TACTICAL_POSITIONS: &[&str] = &[
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    // en passant would expose the king along the rank
    "8/8/8/KPp4r/8/8/8/7k w - c6 0 2",
    // en passant captures the checking pawn
    "8/8/8/2k5/3Pp3/8/8/4K3 b - d3 0 1",
    // castling through an attacked square
    "r3k2r/8/8/8/8/8/6b1/R3K2R w KQkq - 0 1",
    // pinned bishop on the file
    "4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1",
    // double check from knight and rook
    "4k3/8/8/8/8/5n2/8/r3K3 w - - 0 1",
    // promotions with and without capture
    "1r2k3/2P5/8/8/8/8/8/4K3 w - - 0 1",
];

#[test]
fn test_generator_matches_reference_on_tactical_positions() {
    for fen in TACTICAL_POSITIONS {
        let board = Board::from_fen(fen);
        assert_eq!(generated_moves(&board), reference_moves(&board), "position {fen}");
    }
}

#[test]
fn test_generator_matches_reference_on_random_walks() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for fen in TACTICAL_POSITIONS {
        let mut board = Board::from_fen(fen);
        for _ in 0..40 {
            let generated = generated_moves(&board);
            assert_eq!(generated, reference_moves(&board), "position {}", board.to_fen());
            let moves = board.generate_moves();
            if moves.is_empty() {
                break;
            }
            let mv = moves.as_slice()[rng.gen_range(0..moves.len())];
            board.make_move(mv);
        }
    }
}

#[test]
fn test_captures_are_the_capturing_subset() {
    for fen in TACTICAL_POSITIONS {
        let board = Board::from_fen(fen);
        let captures: BTreeSet<String> =
            board.generate_captures().iter().map(ToString::to_string).collect();
        let expected: BTreeSet<String> = board
            .generate_moves()
            .iter()
            .filter(|m| m.is_capture())
            .map(ToString::to_string)
            .collect();
        assert_eq!(captures, expected, "position {fen}");
    }
}

#[test]
fn test_double_check_allows_only_king_moves() {
    let board = Board::from_fen(TACTICAL_POSITIONS[8]);
    assert!(board.is_in_check());
    assert!(board.generate_moves().iter().all(|m| m.piece == Piece::King));
}
