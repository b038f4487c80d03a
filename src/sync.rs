// Copyright 2025 the Camera Measure Authors
// SPDX-License-Identifier: Apache-2.0

//! Main/tab replication for one camera.
//!
//! The two sessions never share state. After an operation on one side
//! emits a drawing event, the coordinator copies that side's full drawing
//! state into the other side. Selection, tool and viewport stay per side.

use crate::editing::{EditSession, SessionEvent};
use crate::settings::EngineSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Main,
    Tab,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Main => Side::Tab,
            Side::Tab => Side::Main,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewPair {
    main: EditSession,
    tab: EditSession,
}

impl ViewPair {
    pub fn new(view_name: &str, settings: EngineSettings) -> Self {
        Self {
            main: EditSession::new(view_name, settings.clone()),
            tab: EditSession::new(view_name, settings),
        }
    }

    pub fn main(&self) -> &EditSession {
        &self.main
    }

    pub fn tab(&self) -> &EditSession {
        &self.tab
    }

    pub fn side(&self, side: Side) -> &EditSession {
        match side {
            Side::Main => &self.main,
            Side::Tab => &self.tab,
        }
    }

    pub fn with_main<R>(&mut self, f: impl FnOnce(&mut EditSession) -> R) -> (R, Vec<SessionEvent>) {
        self.with_side(Side::Main, f)
    }

    pub fn with_tab<R>(&mut self, f: impl FnOnce(&mut EditSession) -> R) -> (R, Vec<SessionEvent>) {
        self.with_side(Side::Tab, f)
    }

    /// Run `f` on one side, then replicate if it changed the drawing.
    ///
    /// Returns `f`'s result and the events the side emitted.
    pub fn with_side<R>(
        &mut self,
        side: Side,
        f: impl FnOnce(&mut EditSession) -> R,
    ) -> (R, Vec<SessionEvent>) {
        let (source, target) = match side {
            Side::Main => (&mut self.main, &mut self.tab),
            Side::Tab => (&mut self.tab, &mut self.main),
        };
        let result = f(source);
        let events = source.drain_events();

        if events.iter().any(SessionEvent::requires_replication) {
            target.set_drawing_state(source.drawing_state());
            // the target's own selection change is local to it
            target.drain_events();
            tracing::info!(
                "[{}] replicated {} object(s) from {:?} to {:?}",
                source.view_name(),
                source.store().len(),
                side,
                side.other()
            );
        }
        (result, events)
    }
}
