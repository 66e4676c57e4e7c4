pub mod perfume;

pub use perfume::{Gender, Perfume, PerfumeId, Season};
