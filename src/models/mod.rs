pub mod alert;
pub mod device;
pub mod farm;
pub mod reading;

pub use alert::{Alert, AlertLevel, AlertListResponse, CandidateAlert};
pub use device::{
    DeviceListResponse, DeviceStatus, RegisterDeviceRequest, RegisterDeviceResponse, SensorDevice,
};
pub use farm::Farm;
pub use reading::{
    IngestResponse, NewSensorReading, ReadingListResponse, SensorReading, TelemetrySubmission,
};
