use carerota_core::color_for;

pub fn run(name: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pair = color_for(name);
    if json {
        println!("{}", serde_json::to_string_pretty(&pair)?);
    } else {
        println!("{} {}", pair.bg, pair.text);
    }
    Ok(())
}
