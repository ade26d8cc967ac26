//! In-process publish/subscribe bus.
//!
//! The [`EventBus`] decouples the concussion controller from the camera, UI
//! and audio code that reacts to it. Subscribers register a callback for one
//! [`BusEventKind`]; [`EventBus::publish`] invokes every callback for that
//! kind synchronously, in subscription order, on the simulation thread.
//!
//! # Event kinds
//!
//! | kind | payload |
//! |------|---------|
//! | `player-hit` | `{ durationMs }` |
//! | `concussion-update` | `{ run, rotationX, rotationY }` |
//!
//! A concussion run publishes `concussion-update` once per frame and always
//! finishes with a `{0, 0}` payload.

use bevy_ecs::prelude::Resource;
use log::trace;
use rustc_hash::FxHashMap;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BusEventKind {
    PlayerHit,
    ConcussionUpdate,
}

impl BusEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusEventKind::PlayerHit => "player-hit",
            BusEventKind::ConcussionUpdate => "concussion-update",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum BusEvent {
    /// A player was struck; the disturbance lasts `duration_ms`.
    PlayerHit { duration_ms: u32 },
    /// One frame of a concussion run. `run` identifies the run entity.
    ConcussionUpdate {
        run: u64,
        rotation_x: f32,
        rotation_y: f32,
    },
}

impl BusEvent {
    pub fn kind(&self) -> BusEventKind {
        match self {
            BusEvent::PlayerHit { .. } => BusEventKind::PlayerHit,
            BusEvent::ConcussionUpdate { .. } => BusEventKind::ConcussionUpdate,
        }
    }
}

pub type Subscriber = Box<dyn Fn(&BusEvent) + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Resource, Default)]
pub struct EventBus {
    subscribers: FxHashMap<BusEventKind, Vec<(SubscriptionId, Subscriber)>>,
    next_id: u64,
    published: u64,
}

impl EventBus {
    pub fn subscribe(
        &mut self,
        kind: BusEventKind,
        callback: impl Fn(&BusEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers
            .entry(kind)
            .or_default()
            .push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for list in self.subscribers.values_mut() {
            if let Some(index) = list.iter().position(|(sub, _)| *sub == id) {
                list.remove(index);
                return true;
            }
        }
        false
    }

    pub fn subscriber_count(&self, kind: BusEventKind) -> usize {
        self.subscribers.get(&kind).map_or(0, Vec::len)
    }

    /// Total number of events published so far.
    pub fn published(&self) -> u64 {
        self.published
    }

    pub fn publish(&mut self, event: &BusEvent) {
        self.published += 1;
        let Some(list) = self.subscribers.get(&event.kind()) else {
            return;
        };
        trace!("bus: {} -> {} subscriber(s)", event.kind().as_str(), list.len());
        for (_, callback) in list {
            callback(event);
        }
    }
}
