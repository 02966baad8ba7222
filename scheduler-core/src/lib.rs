pub mod config;
pub mod error;
pub mod format;
pub mod i18n;
pub mod login;
pub mod model;
pub mod report;
pub mod rules;
pub mod service;
pub mod store;

pub use config::SchedulerConfig;
pub use error::{Result, SchedulerError};
pub use i18n::Locale;
pub use login::{authenticate, LoginActivityLog};
pub use report::{ContactScheduleReport, CustomerScheduleReport, MonthTypeReport};
pub use rules::{check_schedule, within_business_hours, Overrides, TimeRange, BUSINESS_ZONE};
pub use service::{
    AppointmentService, ContactService, CountryService, CustomerService, DivisionService,
    Services, TimeSpan, UserService,
};
pub use store::{Dao, Daos};
