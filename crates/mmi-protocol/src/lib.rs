//! The EN 50221 Man-Machine Interface application resource.
//!
//! This crate implements the protocol engine that sits on top of an
//! already-established Common Interface session with a Conditional Access
//! Module: it decodes the 24-object MMI set (menus, enquiries, subtitles,
//! scene graphics, downloads), reassembles fragmented objects, and encodes
//! the eight outgoing replies. Everything below an established session
//! (link framing, transport/session layers, character-device ioctls) is a
//! collaborator supplied through [`send::SendInterface`], not a concern of
//! this crate.
//!
//! Start at [`MmiResource`]: construct one with a [`send::SendInterface`]
//! and a [`config::ResourceConfig`], register an [`callbacks::MmiCallbacks`]
//! implementation, and feed it PDUs via [`MmiResource::deliver`].

pub mod asn1;
pub mod callbacks;
pub mod config;
pub mod constants;
pub mod encoders;
pub mod parsers;
pub mod resource;
pub mod send;
pub mod session;
pub mod text;

pub use callbacks::{MmiCallbacks, NullCallbacks, TextField};
pub use config::ResourceConfig;
pub use encoders::{DisplayReplyPayload, GfxCharacteristics, PixelDepth};
pub use resource::MmiResource;
pub use send::SendInterface;
pub use session::Outcome;
