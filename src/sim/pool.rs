//! Entity pools
//!
//! Both pools remove by swap-pop: the last entry moves into the freed slot,
//! so indices are not stable across a removal. Callers scanning while
//! removing must either walk backward or re-check the same index.

use serde::{Deserialize, Serialize};

use super::creature::{Creature, Role};
use super::weapon::Bullet;
use crate::error::Result;

/// Growable pool owning every live creature
#[derive(Debug, Clone, Default)]
pub struct CharacterPool {
    creatures: Vec<Creature>,
}

impl CharacterPool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            creatures: Vec::with_capacity(capacity.max(1)),
        }
    }

    /// Append a creature, doubling capacity when full.
    ///
    /// Returns the new creature's index.
    pub fn add(&mut self, creature: Creature) -> Result<usize> {
        if self.creatures.len() == self.creatures.capacity() {
            let grow = self.creatures.capacity().max(1);
            self.creatures.try_reserve_exact(grow)?;
        }
        self.creatures.push(creature);
        Ok(self.creatures.len() - 1)
    }

    /// Swap-pop removal, `None` if `index` is out of range
    pub fn remove(&mut self, index: usize) -> Option<Creature> {
        if index < self.creatures.len() {
            Some(self.creatures.swap_remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&Creature> {
        self.creatures.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Creature> {
        self.creatures.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.creatures.capacity()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Creature> {
        self.creatures.iter_mut()
    }

    pub fn as_slice(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn as_mut_slice(&mut self) -> &mut [Creature] {
        &mut self.creatures
    }

    /// Index of the player, wherever swap-pop has left it
    pub fn player_index(&self) -> Option<usize> {
        self.creatures.iter().position(|c| c.role == Role::Player)
    }

    pub fn player(&self) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.role == Role::Player)
    }

    pub fn player_mut(&mut self) -> Option<&mut Creature> {
        self.creatures.iter_mut().find(|c| c.role == Role::Player)
    }

    /// Remove dead hostiles, returning the total of their max HP.
    ///
    /// The player is never removed here, whatever its HP.
    pub fn remove_dead_hostiles(&mut self) -> (u32, u64) {
        let mut killed = 0;
        let mut score = 0;
        for i in (0..self.creatures.len()).rev() {
            let c = &self.creatures[i];
            if c.role == Role::Hostile && c.hp <= 0.0 {
                score += c.max_hp.max(0.0) as u64;
                killed += 1;
                self.creatures.swap_remove(i);
            }
        }
        (killed, score)
    }

    /// Drop every creature
    pub fn clear(&mut self) {
        self.creatures.clear();
    }
}

/// What a full bullet pool does with a new shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OverflowPolicy {
    /// Overwrite slot 0 with the new bullet
    #[default]
    ReplaceFirstSlot,
    /// Discard the new bullet
    DropNew,
}

/// Fixed-capacity pool of bullets held by value
#[derive(Debug, Clone)]
pub struct BulletPool {
    bullets: Vec<Bullet>,
    capacity: usize,
    policy: OverflowPolicy,
}

/// Outcome of adding to the bullet pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// Pool was full; slot 0 was overwritten
    Replaced,
    /// Pool was full; the bullet was discarded
    Dropped,
}

impl BulletPool {
    pub fn new(capacity: usize, policy: OverflowPolicy) -> Self {
        Self {
            bullets: Vec::with_capacity(capacity),
            capacity,
            policy,
        }
    }

    pub fn add(&mut self, bullet: Bullet) -> AddOutcome {
        if self.bullets.len() < self.capacity {
            self.bullets.push(bullet);
            return AddOutcome::Added;
        }
        match self.policy {
            OverflowPolicy::ReplaceFirstSlot if self.capacity > 0 => {
                log::debug!("bullet pool full ({}), replacing slot 0", self.capacity);
                self.bullets[0] = bullet;
                AddOutcome::Replaced
            }
            _ => AddOutcome::Dropped,
        }
    }

    /// Swap-pop removal, `None` if `index` is out of range
    pub fn remove(&mut self, index: usize) -> Option<Bullet> {
        if index < self.bullets.len() {
            Some(self.bullets.swap_remove(index))
        } else {
            None
        }
    }

    /// Remove every spent bullet, returning how many went
    pub fn remove_spent(&mut self) -> usize {
        let before = self.bullets.len();
        let mut i = 0;
        while i < self.bullets.len() {
            if self.bullets[i].spent {
                // re-check `i`: it now holds the former last bullet
                self.bullets.swap_remove(i);
            } else {
                i += 1;
            }
        }
        before - self.bullets.len()
    }

    pub fn get(&self, index: usize) -> Option<&Bullet> {
        self.bullets.get(index)
    }

    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Bullet> {
        self.bullets.iter_mut()
    }

    pub fn clear(&mut self) {
        self.bullets.clear();
    }
}
