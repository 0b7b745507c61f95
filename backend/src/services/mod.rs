pub mod analysis;
pub mod csv_export;
pub mod youtube;
