//! Geometric transform and back-projection parameters.

use crate::node::hm_record;
use crate::records::{Described, Tracked};
use crate::value::{Decimal, NormalizedString};

hm_record! {
    /// Corrections applied to the sinograms before back-projection.
    pub struct Transform as "TransformType" (element_only) {
        child missed_projections: Option<Described<String>> = "MissedProjections",
        child missed_projections_type: Option<Described<NormalizedString>> = "MissedProjectionsType",
        child rotation_angle_type: Option<Described<i32>> = "RotationAngleType",
        unsettable rotation_angle: Option<i32> = "RotationAngle",
        child rotation_angle_end_points: Option<Described<NormalizedString>> = "RotationAngleEndPoints",
        element re_centre_angle: Option<Decimal> = "ReCentreAngle",
        element re_centre_radius: Option<Decimal> = "ReCentreRadius",
        unsettable crop_top: Option<i32> = "CropTop",
        unsettable crop_bottom: Option<i32> = "CropBottom",
        unsettable crop_left: Option<i32> = "CropLeft",
        unsettable crop_right: Option<i32> = "CropRight",
        child scale_type: Option<Described<NormalizedString>> = "ScaleType",
        unsettable scale_width: Option<i32> = "ScaleWidth",
        unsettable scale_height: Option<i32> = "ScaleHeight",
        child extrapolation_type: Option<Described<NormalizedString>> = "ExtrapolationType",
        unsettable extrapolation_pixels: Option<i32> = "ExtrapolationPixels",
        unsettable extrapolation_width: Option<i32> = "ExtrapolationWidth",
        child interpolation: Option<Described<NormalizedString>> = "Interpolation",
    }
}

hm_record! {
    /// Reconstruction geometry.
    pub struct Backprojection as "BackprojectionType" (element_only) {
        child filter: Option<Filter> = "Filter",
        /// Centre of rotation in pixels.
        element image_centre: Option<Decimal> = "ImageCentre",
        child clockwise_rotation: Option<Tracked<NormalizedString>> = "ClockwiseRotation",
        child tilt: Option<Tilt> = "Tilt",
        child coordinate_system: Option<CoordinateSystem> = "CoordinateSystem",
        child circles: Option<Circles> = "Circles",
        child roi: Option<Roi> = "ROI",
        child polar_cartesian_interpolation: Option<Tracked<NormalizedString>> = "PolarCartesianInterpolation",
    }
}

hm_record! {
    pub struct Filter as "FilterType" (element_only) {
        child kind: Option<Described<NormalizedString>> = "Type",
        child name: Option<Described<NormalizedString>> = "Name",
        element bandwidth: Option<Decimal> = "Bandwidth",
        child window_name: Option<Described<NormalizedString>> = "WindowName",
        child normalisation: Option<Described<NormalizedString>> = "Normalisation",
        element pixel_size: Option<Decimal> = "PixelSize",
    }
}

hm_record! {
    pub struct Tilt as "TiltType" (element_only) {
        child kind: Option<Described<NormalizedString>> = "Type",
        element x_tilt: Option<String> = "X-tilt",
        element z_tilt: Option<String> = "Z-tilt",
        attribute done: NormalizedString = "done",
    }
}

hm_record! {
    pub struct CoordinateSystem as "CoordinateSystemType" (element_only) {
        child kind: Option<Described<NormalizedString>> = "Type",
        element slice: Option<String> = "Slice",
        attribute done: NormalizedString = "done",
    }
}

hm_record! {
    /// Circular mask sweep.
    pub struct Circles as "CirclesType" (element_only) {
        child value_min: Option<SweepLimit> = "ValueMin",
        child value_max: Option<SweepLimit> = "ValueMax",
        child value_step: Option<SweepLimit> = "ValueStep",
        attribute comm: String = "comm",
    }
}

hm_record! {
    /// One bound of the circle sweep, as a percentage or in pixels.
    pub struct SweepLimit as "SweepLimitType" (element_only) {
        child kind: Option<Described<NormalizedString>> = "Type",
        unsettable percent: Option<i32> = "Percent",
        unsettable pixel: Option<i32> = "Pixel",
    }
}

hm_record! {
    /// Region of interest and output window.
    pub struct Roi as "ROIType" (element_only) {
        child kind: Option<Described<NormalizedString>> = "Type",
        unsettable xmin: Option<i32> = "Xmin",
        unsettable xmax: Option<i32> = "Xmax",
        unsettable ymin: Option<i32> = "Ymin",
        unsettable ymax: Option<i32> = "Ymax",
        child output_width_type: Option<Described<NormalizedString>> = "OutputWidthType",
        unsettable output_width: Option<i32> = "OutputWidth",
        element angle: Option<Decimal> = "Angle",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Record;

    #[test]
    fn circles_comment_is_a_required_string() {
        let comm = <Circles as Record>::CLASS.attribute("comm").unwrap();
        assert!(comm.is_required());
        assert_eq!(comm.datatype.xsd_name(), "xsd:string");
    }

    #[test]
    fn backprojection_status_leaves_are_tracked() {
        let class = <Backprojection as Record>::CLASS;
        for name in ["ClockwiseRotation", "PolarCartesianInterpolation"] {
            let leaf = class.element(name).unwrap().datatype.record().unwrap();
            assert_eq!(leaf.name, "Tracked<xsd:normalizedString>");
        }
        assert_eq!(class.element("ROI").unwrap().datatype.xsd_name(), "ROIType");
    }
}
