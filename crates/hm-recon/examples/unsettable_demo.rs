use std::error::Error;

use hm_recon::model::{FieldPath, HmDocument};

const XML: &str = r#"
<HMxml>
    <FBP>
        <GPUDeviceNumber>0</GPUDeviceNumber>
        <Backprojection>
            <ImageCentre>1283.250000000000000001</ImageCentre>
            <Tilt done="no">
                <X-tilt>0.0</X-tilt>
            </Tilt>
        </Backprojection>
    </FBP>
</HMxml>
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let mut document: HmDocument = XML.parse()?;

    println!("Unsettable demo\n===============\n");

    describe(&document, "FBP/GPUDeviceNumber")?;
    describe(&document, "FBP/Backprojection/ImageCentre")?;
    describe(&document, "FBP/Backprojection/Tilt@done")?;
    describe(&document, "FBP/LogFile")?;

    document.unset("FBP/GPUDeviceNumber")?;
    println!("\nafter unset:");
    describe(&document, "FBP/GPUDeviceNumber")?;

    document.set("FBP/GPUDeviceNumber", "0")?;
    println!("after set to 0:");
    describe(&document, "FBP/GPUDeviceNumber")?;

    match document.unset("FBP/Backprojection/Tilt@done") {
        Ok(()) => println!("Tilt@done unset"),
        Err(err) => println!("refused: {err}"),
    }

    println!("\n{}", document.to_xml_string()?);
    Ok(())
}

fn describe(document: &HmDocument, path: &str) -> Result<(), Box<dyn Error>> {
    let parsed = path.parse::<FieldPath>()?.to_string();
    match document.get(path)? {
        Some(value) => println!("{parsed:<45} = {value:?}"),
        None => println!("{parsed:<45}   (unset)"),
    }
    Ok(())
}
