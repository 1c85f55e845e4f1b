//! Typed records of the hm schema, from `HMxml` down to the leaf values.
//!
//! Optional nested records are `Option<Record>`, optional scalars are
//! `Option<T>`; required attributes are plain values. Field order follows the
//! schema sequence and is the order used when writing.

mod correction;
mod data;
mod geometry;
mod leaf;

pub use correction::{
    DarkField, FlatDarkFields, FlatField, HighPeaks, Intensity, Preprocessing, RingArtefacts,
};
pub use data::{InputData, OutputData, Raw};
pub use geometry::{
    Backprojection, Circles, CoordinateSystem, Filter, Roi, SweepLimit, Tilt, Transform,
};
pub use leaf::{Described, Flagged, Tracked};

use crate::node::hm_record;
use crate::value::NormalizedString;

hm_record! {
    /// Document element. Its only content is the reconstruction job.
    pub struct HmXml as "HMxmlType" (element_only) {
        child fbp: Option<Fbp> = "FBP",
    }
}

hm_record! {
    /// Filtered back-projection job descriptor.
    pub struct Fbp as "FBPType" (element_only) {
        child default_xml: Option<Flagged<String>> = "DefaultXml",
        /// GPU to run on; `Some(0)` and `None` are different settings.
        unsettable gpu_device_number: Option<i32> = "GPUDeviceNumber",
        child beamline_user: Option<BeamlineUser> = "BeamlineUser",
        element log_file: Option<NormalizedString> = "LogFile",
        child input_data: Option<InputData> = "InputData",
        child flat_dark_fields: Option<FlatDarkFields> = "FlatDarkFields",
        child preprocessing: Option<Preprocessing> = "Preprocessing",
        child transform: Option<Transform> = "Transform",
        child backprojection: Option<Backprojection> = "Backprojection",
        child output_data: Option<OutputData> = "OutputData",
    }
}

hm_record! {
    /// Experiment identity and the folders it reads from and writes to.
    pub struct BeamlineUser as "BeamlineUserType" (element_only) {
        child kind: Option<Described<NormalizedString>> = "Type",
        element beamline_name: Option<String> = "BeamlineName",
        element year: Option<String> = "Year",
        element month: Option<String> = "Month",
        element date: Option<String> = "Date",
        element visit_number: Option<String> = "VisitNumber",
        element input_data_folder: Option<String> = "InputDataFolder",
        element input_scan_folder: Option<String> = "InputScanFolder",
        element output_data_folder: Option<String> = "OutputDataFolder",
        element output_scan_folder: Option<String> = "OutputScanFolder",
        attribute done: NormalizedString = "done",
    }
}
