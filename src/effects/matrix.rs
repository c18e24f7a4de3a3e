//! The N×N routing matrix of in-flight balls.
//!
//! ## Queue identity
//!
//! A ball lives in the queue of its *insertion* pair `(source, target)`
//! for the whole round. Rewrites change the ball's own endpoint fields,
//! never its queue, so cancellation still pairs balls by where they were
//! emitted, not where they will land.
//!
//! ## Order
//!
//! Iteration is source-major: `(0,0), (0,1), …, (1,0), …`, FIFO within a
//! queue. Delivery follows this order.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

use super::Ball;

/// Directed, per-pair FIFO queues of balls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallMatrix {
    size: usize,
    queues: Vec<VecDeque<Ball>>,
}

impl BallMatrix {
    /// Empty matrix for `size` participants.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            queues: vec![VecDeque::new(); size * size],
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    fn slot(&self, source: PlayerId, target: PlayerId) -> usize {
        source.index() * self.size + target.index()
    }

    fn pair(&self, slot: usize) -> (PlayerId, PlayerId) {
        (
            PlayerId::new((slot / self.size) as u8),
            PlayerId::new((slot % self.size) as u8),
        )
    }

    /// Append a ball to queue `(source, target)`.
    pub fn insert(&mut self, source: PlayerId, target: PlayerId, ball: Ball) {
        let slot = self.slot(source, target);
        self.queues[slot].push_back(ball);
    }

    /// The queue for an ordered pair.
    #[must_use]
    pub fn queue(&self, source: PlayerId, target: PlayerId) -> &VecDeque<Ball> {
        &self.queues[self.slot(source, target)]
    }

    /// Total balls in all queues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queues.iter().map(VecDeque::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queues.iter().all(VecDeque::is_empty)
    }

    /// All balls with their queue pair, in delivery order.
    pub fn iter(&self) -> impl Iterator<Item = ((PlayerId, PlayerId), &Ball)> {
        self.queues
            .iter()
            .enumerate()
            .flat_map(move |(slot, q)| {
                let pair = self.pair(slot);
                q.iter().map(move |ball| (pair, ball))
            })
    }

    /// Mutable access to every ball, in delivery order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = ((PlayerId, PlayerId), &mut Ball)> {
        let size = self.size;
        self.queues
            .iter_mut()
            .enumerate()
            .flat_map(move |(slot, q)| {
                let pair = (
                    PlayerId::new((slot / size) as u8),
                    PlayerId::new((slot % size) as u8),
                );
                q.iter_mut().map(move |ball| (pair, ball))
            })
    }

    /// Pairwise FIFO cancellation.
    ///
    /// For each unordered pair `i < j`, pops the fronts of `(i, j)` and
    /// `(j, i)` together until one of them is empty. Returns the `(i, j)`
    /// pair once per cancelled couple, in the order they were popped.
    pub fn cancel_opposing(&mut self) -> Vec<(PlayerId, PlayerId)> {
        let mut cancelled = Vec::new();

        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let forward = i * self.size + j;
                let backward = j * self.size + i;
                while !self.queues[forward].is_empty() && !self.queues[backward].is_empty() {
                    self.queues[forward].pop_front();
                    self.queues[backward].pop_front();
                    cancelled.push((PlayerId::new(i as u8), PlayerId::new(j as u8)));
                }
            }
        }

        cancelled
    }

    /// Remove every ball, returning them in delivery order.
    pub fn drain(&mut self) -> Vec<((PlayerId, PlayerId), Ball)> {
        let size = self.size;
        self.queues
            .iter_mut()
            .enumerate()
            .flat_map(|(slot, q)| {
                let pair = (
                    PlayerId::new((slot / size) as u8),
                    PlayerId::new((slot % size) as u8),
                );
                q.drain(..).map(move |ball| (pair, ball))
            })
            .collect()
    }

    /// Empty every queue.
    pub fn clear(&mut self) {
        self.queues.iter_mut().for_each(VecDeque::clear);
    }
}
