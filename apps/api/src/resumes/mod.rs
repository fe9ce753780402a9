// Resume records: schema validation, the keyed store, and the REST handlers.

pub mod handlers;
pub mod store;
pub mod validation;
