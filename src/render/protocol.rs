//! Protocol definitions shared between the application and the display loop.

use crate::element::{ElementId, Phase, ViewKind};
use crate::error::DisplayError;
use std::sync::Arc;
use std::time::Duration;

/// Identifier attached to requests so responses can be correlated.
pub type RequestId = u64;

/// Commands sent to the display loop. They are processed strictly in order.
#[derive(Debug)]
pub enum DisplayCommand<T> {
    Render {
        request_id: RequestId,
        token: Arc<T>,
    },
    ClearAll {
        request_id: RequestId,
    },
    /// Move running transitions forward by the given amount of time.
    Advance(Duration),
    /// The display surface changed size.
    Resize {
        width: u16,
        height: u16,
    },
    Snapshot {
        request_id: RequestId,
    },
    Shutdown,
}

/// One attached element as seen at snapshot time.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSnapshot<V> {
    pub id: ElementId,
    pub kind: ViewKind,
    pub phase: Phase,
    pub opacity: f32,
    pub offset: f32,
    pub opaque: bool,
    pub view: V,
}

/// Everything attached to the display surface, topmost first.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySnapshot<V> {
    pub layers: Vec<LayerSnapshot<V>>,
    pub current: Option<ElementId>,
    /// Elements still animating out.
    pub exiting: usize,
    /// No transition in flight.
    pub settled: bool,
}

impl<V> Default for DisplaySnapshot<V> {
    fn default() -> Self {
        Self {
            layers: Vec::new(),
            current: None,
            exiting: 0,
            settled: true,
        }
    }
}

impl<V> DisplaySnapshot<V> {
    pub fn top(&self) -> Option<&LayerSnapshot<V>> {
        self.layers.first()
    }
}

/// Responses emitted by the display loop.
#[derive(Debug)]
pub enum DisplayResponse<V> {
    Rendered {
        request_id: RequestId,
        element: ElementId,
    },
    AlreadyShowing {
        request_id: RequestId,
    },
    Cleared {
        request_id: RequestId,
    },
    /// Elements removed from the surface since the previous command.
    Detached(Vec<ElementId>),
    Snapshot {
        request_id: RequestId,
        snapshot: DisplaySnapshot<V>,
    },
    Error {
        request_id: Option<RequestId>,
        error: DisplayError,
    },
}
