use rand::{Rng as _, RngCore, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::core::Piece;

/// Produces spawn-positioned pieces of uniformly random kind.
///
/// The generator keeps a one-piece lookahead. The first call to [`PieceGenerator::next`]
/// draws two pieces: one to hand out and one to keep as the preview. Every later call
/// hands out the preview and draws a replacement.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
    upcoming: Option<Piece>,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Creates a new [`PieceGenerator`].
    ///
    /// The random seed is initialized from the OS's random data source.
    #[must_use]
    pub fn new() -> Self {
        Self::from_pcg(Pcg32::from_os_rng())
    }

    /// Creates a generator whose piece sequence is fully determined by `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_pcg(Pcg32::seed_from_u64(seed))
    }

    /// Creates a generator seeded from another random source.
    pub fn from_rng(rng: &mut impl RngCore) -> Self {
        Self::from_pcg(Pcg32::from_rng(rng))
    }

    const fn from_pcg(rng: Pcg32) -> Self {
        Self {
            rng,
            upcoming: None,
        }
    }

    fn draw(&mut self) -> Piece {
        Piece::new(self.rng.random())
    }

    /// Returns the next current piece and refills the preview.
    #[expect(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Piece {
        let current = match self.upcoming.take() {
            Some(piece) => piece,
            None => self.draw(),
        };
        self.upcoming = Some(self.draw());
        current
    }

    /// Returns the piece the next call to [`PieceGenerator::next`] will hand out.
    ///
    /// `None` until the first piece has been taken.
    #[must_use]
    pub const fn peek(&self) -> Option<&Piece> {
        self.upcoming.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PieceKind, PiecePosition};

    #[test]
    fn test_preview_is_available_after_first_piece() {
        let mut generator = PieceGenerator::with_seed(1);
        assert!(generator.peek().is_none());

        let _current = generator.next();
        assert!(generator.peek().is_some());
    }

    #[test]
    fn test_preview_becomes_next_current() {
        let mut generator = PieceGenerator::with_seed(2);
        generator.next();
        for _ in 0..50 {
            let preview = *generator.peek().unwrap();
            assert_eq!(generator.next(), preview);
        }
    }

    #[test]
    fn test_pieces_spawn_at_spawn_position() {
        let mut generator = PieceGenerator::with_seed(3);
        for _ in 0..20 {
            let piece = generator.next();
            assert_eq!(piece.position(), PiecePosition::new(3, 0));
            assert_eq!(piece.shape(), &piece.kind().shape());
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PieceGenerator::with_seed(99);
        let mut b = PieceGenerator::with_seed(99);
        let kinds_a: Vec<_> = (0..30).map(|_| a.next().kind()).collect();
        let kinds_b: Vec<_> = (0..30).map(|_| b.next().kind()).collect();
        assert_eq!(kinds_a, kinds_b);
    }

    #[test]
    fn test_every_kind_appears() {
        let mut generator = PieceGenerator::with_seed(4);
        let mut counts = [0_usize; PieceKind::LEN];
        for _ in 0..700 {
            let kind = generator.next().kind();
            counts[PieceKind::ALL.iter().position(|k| *k == kind).unwrap()] += 1;
        }
        assert!(counts.iter().all(|c| *c > 0), "{counts:?}");
    }
}
