use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PopupState {
    #[default]
    Closed,
    HoverOpen,
    Pinned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupEvent {
    PointerEnter,
    PointerLeave,
    Click,
    /// The popup's own close control was used.
    Close,
    /// Opened from outside the marker, e.g. from its table row.
    Reveal,
}

/// What a marker click does to an already pinned popup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickPolicy {
    /// A second click unpins and closes.
    #[default]
    Toggle,
    /// Every click pins.
    AlwaysPin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAction {
    Open,
    Close,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopupMachine {
    state: PopupState,
}

impl PopupMachine {
    pub fn state(&self) -> PopupState {
        self.state
    }

    pub fn is_pinned(&self) -> bool {
        self.state == PopupState::Pinned
    }

    /// Advances the machine and returns the popup action to perform, if any.
    pub fn dispatch(&mut self, event: PopupEvent, policy: ClickPolicy) -> Option<PopupAction> {
        use PopupAction::{Close, Open};
        use PopupState::{Closed, HoverOpen, Pinned};

        let (next, action) = match (self.state, event) {
            (Closed, PopupEvent::PointerEnter) => (HoverOpen, Some(Open)),
            (HoverOpen, PopupEvent::PointerLeave) => (Closed, Some(Close)),
            (state, PopupEvent::PointerEnter | PopupEvent::PointerLeave) => (state, None),

            (Pinned, PopupEvent::Click) if policy == ClickPolicy::Toggle => (Closed, Some(Close)),
            (_, PopupEvent::Click | PopupEvent::Reveal) => (Pinned, Some(Open)),

            (Closed, PopupEvent::Close) => (Closed, None),
            (HoverOpen | Pinned, PopupEvent::Close) => (Closed, Some(Close)),
        };

        if next != self.state {
            tracing::trace!(from = ?self.state, to = ?next, ?event, "popup transition");
        }
        self.state = next;
        action
    }
}
