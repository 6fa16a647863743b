pub mod bridge;
pub mod events;

// Re-export the essential types
pub use bridge::{ClickListener, PointerEventBridge};
pub use events::{Invocation, InvocationCounter, PendingClick, SurfaceEvent};
