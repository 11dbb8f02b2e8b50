//! Walk-in token queue.
//!
//! A token is issued for every registered patient and called in FIFO order. The
//! number issued is the current queue length plus one, so once tokens have been
//! called a later patient can receive a number that was issued before.

use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct TokenQueue {
    queue: VecDeque<u32>,
}

impl TokenQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next token and places it at the back of the queue.
    pub fn issue(&mut self) -> u32 {
        let token = self.queue.len() as u32 + 1;
        self.queue.push_back(token);
        token
    }

    /// Removes and returns the token at the head of the queue.
    pub fn call_next(&mut self) -> Option<u32> {
        self.queue.pop_front()
    }

    /// Tokens still waiting, head first.
    pub fn pending(&self) -> impl ExactSizeIterator<Item = u32> + '_ {
        self.queue.iter().copied()
    }
}
