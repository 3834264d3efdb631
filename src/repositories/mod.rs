pub mod alerts;
pub mod devices;
pub mod farms;
pub mod readings;

pub use alerts::AlertRepository;
pub use devices::{DeviceRepository, NewDevice};
pub use farms::FarmRepository;
pub use readings::ReadingRepository;
