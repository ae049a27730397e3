pub mod dns;

pub use dns::{ResolutionLimits, ResolveDomainUseCase};
