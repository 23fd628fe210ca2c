pub mod rates;
pub mod session;
pub mod traits;
pub mod types;

pub use rates::{CachedRates, HttpRates, StaticRates};
pub use session::{SessionFileSource, SESSION_KEY};
pub use traits::{HotelSource, RateProvider};
pub use types::{ApiFilterState, SearchParams, SelectedCity, SessionPayload};
