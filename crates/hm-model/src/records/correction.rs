//! Flat/dark field calibration and the preprocessing stages.

use crate::node::hm_record;
use crate::records::Described;
use crate::value::{Decimal, NormalizedString};

hm_record! {
    pub struct FlatDarkFields as "FlatDarkFieldsType" (element_only) {
        child flat_field: Option<FlatField> = "FlatField",
        child dark_field: Option<DarkField> = "DarkField",
    }
}

hm_record! {
    /// Flat field taken before and after the scan.
    pub struct FlatField as "FlatFieldType" (element_only) {
        child kind: Option<Described<NormalizedString>> = "Type",
        unsettable value_before: Option<f64> = "ValueBefore",
        unsettable value_after: Option<f64> = "ValueAfter",
        element file_before: Option<NormalizedString> = "FileBefore",
        element file_after: Option<String> = "FileAfter",
        child profile_type: Option<Described<NormalizedString>> = "ProfileType",
        element file_profile: Option<String> = "FileProfile",
    }
}

hm_record! {
    pub struct DarkField as "DarkFieldType" (element_only) {
        child kind: Option<Described<NormalizedString>> = "Type",
        element value_before: Option<f64> = "ValueBefore",
        element value_after: Option<f64> = "ValueAfter",
        element file_before: Option<NormalizedString> = "FileBefore",
        element file_after: Option<NormalizedString> = "FileAfter",
        child profile_type: Option<Described<NormalizedString>> = "ProfileType",
        element file_profile: Option<String> = "FileProfile",
    }
}

hm_record! {
    pub struct Preprocessing as "PreprocessingType" (element_only) {
        child high_peaks_before: Option<HighPeaks> = "HighPeaksBefore",
        child ring_artefacts: Option<RingArtefacts> = "RingArtefacts",
        child intensity: Option<Intensity> = "Intensity",
        child high_peaks_after_rows: Option<HighPeaks> = "HighPeaksAfterRows",
        child high_peaks_after_columns: Option<HighPeaks> = "HighPeaksAfterColumns",
    }
}

hm_record! {
    /// High-peak (zinger) removal. Used before projection and after it, on
    /// rows and on columns.
    pub struct HighPeaks as "HighPeaksType" (element_only) {
        child kind: Option<Described<NormalizedString>> = "Type",
        unsettable number_pixels: Option<i32> = "NumberPixels",
        element jump: Option<Decimal> = "Jump",
    }
}

hm_record! {
    pub struct RingArtefacts as "RingArtefactsType" (element_only) {
        child kind: Option<Described<NormalizedString>> = "Type",
        element parameter_n: Option<Decimal> = "ParameterN",
        element parameter_r: Option<Decimal> = "ParameterR",
        child num_series: Option<Described<Decimal>> = "NumSeries",
    }
}

hm_record! {
    /// Intensity normalisation against reference columns.
    pub struct Intensity as "IntensityType" (element_only) {
        child kind: Option<Described<NormalizedString>> = "Type",
        element column_left: Option<String> = "ColumnLeft",
        element column_right: Option<String> = "ColumnRight",
        unsettable zero_left: Option<i32> = "ZeroLeft",
        unsettable zero_right: Option<i32> = "ZeroRight",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Record;

    #[test]
    fn flat_values_are_unsettable_dark_values_are_not() {
        let flat = <FlatField as Record>::CLASS;
        let dark = <DarkField as Record>::CLASS;
        assert!(flat.element("ValueBefore").unwrap().is_unsettable());
        assert!(!dark.element("ValueBefore").unwrap().is_unsettable());
        assert_eq!(
            dark.element("ValueAfter").unwrap().datatype.xsd_name(),
            "xsd:double"
        );
    }

    #[test]
    fn high_peak_stages_share_one_class() {
        let class = <Preprocessing as Record>::CLASS;
        let before = class.element("HighPeaksBefore").unwrap().datatype.record().unwrap();
        let rows = class.element("HighPeaksAfterRows").unwrap().datatype.record().unwrap();
        assert_eq!(before.name, rows.name);
        assert_eq!(before.name, "HighPeaksType");
    }
}
