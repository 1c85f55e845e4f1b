//! Input projection stack and reconstructed output descriptions.

use crate::node::hm_record;
use crate::records::{Described, Flagged, Tracked};
use crate::value::{Decimal, NormalizedString};

hm_record! {
    /// Projection image stack: naming, index ranges, raw layout and value
    /// clipping.
    pub struct InputData as "InputDataType" (element_only) {
        element folder: Option<NormalizedString> = "Folder",
        element prefix: Option<NormalizedString> = "Prefix",
        element suffix: Option<String> = "Suffix",
        element extension: Option<NormalizedString> = "Extension",
        child nod: Option<Described<i32>> = "NOD",
        child memory_size_max: Option<Described<Decimal>> = "MemorySizeMax",
        child memory_size_min: Option<Described<i32>> = "MemorySizeMin",
        child orientation: Option<Tracked<NormalizedString>> = "Orientation",
        unsettable file_first: Option<i32> = "FileFirst",
        unsettable file_last: Option<i32> = "FileLast",
        unsettable file_step: Option<i32> = "FileStep",
        child image_first: Option<Flagged<i32>> = "ImageFirst",
        child image_last: Option<Flagged<i32>> = "ImageLast",
        child image_step: Option<Flagged<i32>> = "ImageStep",
        child raw: Option<Raw> = "Raw",
        child first_image_index: Option<Described<i32>> = "FirstImageIndex",
        unsettable images_per_file: Option<i32> = "ImagesPerFile",
        child restrictions: Option<Described<NormalizedString>> = "Restrictions",
        element value_min: Option<Decimal> = "ValueMin",
        element value_max: Option<Decimal> = "ValueMax",
        child kind: Option<Described<NormalizedString>> = "Type",
        child shape: Option<Described<NormalizedString>> = "Shape",
        element pixel_param: Option<Decimal> = "PixelParam",
    }
}

hm_record! {
    /// Headerless binary layout.
    pub struct Raw as "RawType" (element_only) {
        child kind: Option<Described<NormalizedString>> = "Type",
        unsettable bits: Option<i32> = "Bits",
        child offset: Option<Described<i32>> = "Offset",
        child byte_order: Option<Described<NormalizedString>> = "ByteOrder",
        unsettable xlen: Option<i32> = "Xlen",
        unsettable ylen: Option<i32> = "Ylen",
        unsettable zlen: Option<i32> = "Zlen",
        child gap: Option<Described<i32>> = "Gap",
        attribute done: NormalizedString = "done",
    }
}

hm_record! {
    pub struct OutputData as "OutputDataType" (element_only) {
        child kind: Option<Described<NormalizedString>> = "Type",
        /// Pipeline stage marker.
        child state: Option<Described<NormalizedString>> = "State",
        element folder: Option<NormalizedString> = "Folder",
        element prefix: Option<NormalizedString> = "Prefix",
        element suffix: Option<String> = "Suffix",
        element extension: Option<NormalizedString> = "Extension",
        unsettable nod: Option<i32> = "NOD",
        unsettable file_first: Option<i32> = "FileFirst",
        unsettable file_step: Option<i32> = "FileStep",
        child bits_type: Option<Described<NormalizedString>> = "BitsType",
        unsettable bits: Option<i32> = "Bits",
        child restrictions: Option<Described<NormalizedString>> = "Restrictions",
        element value_min: Option<Decimal> = "ValueMin",
        element value_max: Option<Decimal> = "ValueMax",
        child shape: Option<Tracked<NormalizedString>> = "Shape",
    }
}
