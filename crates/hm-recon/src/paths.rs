//! Parameter paths edited when preparing reconstruction jobs.

/// Centre of rotation in pixels (`ImageCentre`).
pub const IMAGE_CENTRE: &str = "FBP/Backprojection/ImageCentre";
/// Folder holding the input sinograms (`InputData/Folder`).
pub const INPUT_FOLDER: &str = "FBP/InputData/Folder";
/// Input file name prefix (`InputData/Prefix`).
pub const INPUT_PREFIX: &str = "FBP/InputData/Prefix";
/// First input file index (`InputData/FileFirst`).
pub const INPUT_FILE_FIRST: &str = "FBP/InputData/FileFirst";
/// Last input file index (`InputData/FileLast`).
pub const INPUT_FILE_LAST: &str = "FBP/InputData/FileLast";
/// Input file index step (`InputData/FileStep`).
pub const INPUT_FILE_STEP: &str = "FBP/InputData/FileStep";
/// Folder receiving the reconstructed slices (`OutputData/Folder`).
pub const OUTPUT_FOLDER: &str = "FBP/OutputData/Folder";
/// Output file name prefix (`OutputData/Prefix`).
pub const OUTPUT_PREFIX: &str = "FBP/OutputData/Prefix";
/// Flat field image taken before the scan (`FlatField/FileBefore`).
pub const FLAT_FILE: &str = "FBP/FlatDarkFields/FlatField/FileBefore";
/// Dark field image taken before the scan (`DarkField/FileBefore`).
pub const DARK_FILE: &str = "FBP/FlatDarkFields/DarkField/FileBefore";
/// Per-job log file (`LogFile`).
pub const LOG_FILE: &str = "FBP/LogFile";
/// GPU the job runs on (`GPUDeviceNumber`).
pub const GPU_DEVICE: &str = "FBP/GPUDeviceNumber";
