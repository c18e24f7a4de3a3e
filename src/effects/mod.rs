//! Effect packets, the routing matrix and delivery.
//!
//! ## Lifecycle of a ball
//!
//! 1. An effect-emitting skill calls [`ResolverContext::emit`], which
//!    appends the ball to the queue of its `(source, target)` pair.
//! 2. Rewrite skills mutate ball endpoints in place via
//!    [`BallMatrix::iter_mut`].
//! 3. [`EffectResolver::deliver`] cancels opposing queues pairwise and
//!    executes each survivor once.
//!
//! ```
//! use skill_clash::core::{Participant, ParticipantDefaults, PlayerId, PlayerMap};
//! use skill_clash::effects::{Ball, BallKind, BallMatrix, EffectResolver, ResolverContext};
//! use skill_clash::events::EventLog;
//! use skill_clash::skills::SkillId;
//!
//! let mut players = PlayerMap::new(2, |id| Participant::new(id, ParticipantDefaults::default()));
//! let mut matrix = BallMatrix::new(2);
//! let mut log = EventLog::new();
//! let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));
//!
//! let mut ctx = ResolverContext::new(&mut players, &mut matrix, &mut log);
//! ctx.emit(Ball::new(SkillId::Rasengan, BallKind::damage(1), 1, p0, p1));
//! EffectResolver::deliver(&mut ctx);
//!
//! assert_eq!(players[p1].hp(), 1);
//! ```

mod ball;
mod matrix;
mod resolver;

pub use ball::{Ball, BallKind};
pub use matrix::BallMatrix;
pub use resolver::{EffectResolver, ResolverContext};
