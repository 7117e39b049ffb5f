//! Custom confirmation surface shown before the OS prompt.

mod scripted;
mod slot;
mod types;

pub use scripted::ScriptedPresenter;
pub use types::{
    CustomSurface, CustomUiPresenter, PassthroughPresenter, PresenterDecision, SurfaceIcon,
};

pub(crate) use slot::SurfaceSlot;
