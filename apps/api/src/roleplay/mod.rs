// Role-play: turn-based rehearsal against a simulated manager.
// One session per pack, created lazily on the first reply.

pub mod engine;
pub mod handlers;
pub mod prompts;
pub mod responder;

pub use engine::DialogueEngine;
pub use responder::FallbackResponder;
