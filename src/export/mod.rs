//! Export Trigger: print-to-PDF through the host, with print-only styling.

pub mod print;

pub use print::{
    ExportOutcome, ExportTrigger, LengthUnit, PhysicalSize, PrintJob, PrintSettings, PrintSurface,
};
