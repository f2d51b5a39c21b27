//! Straight-through harness example: build two connectors and a cable, print the DOT source.
//!
//! Pass an output name to also render a PDF with Graphviz.

use harnessviz::prelude::*;

fn main() -> Result<(), HarnessError> {
    let mut harness = Harness::new().with_color_mode(ColorMode::FullLower);

    harness.add_node(
        NodeSpec::new("X1")
            .with_type("Molex KK 254")
            .with_gender("female")
            .with_pinout(["GND", "VCC", "RX", "TX"])
            .with_ports(false, true),
    )?;
    harness.add_node(
        NodeSpec::new("X2")
            .with_type("Molex KK 254")
            .with_gender("female")
            .with_pinout(["GND", "VCC", "TX", "RX"])
            .with_ports(true, false),
    )?;
    harness.add_cable(
        CableSpec::new("W1")
            .with_wires(4)
            .with_mm2(0.25)
            .with_show_equiv(true)
            .with_length(0.2)
            .with_color_code(ColorCode::Din),
    )?;

    harness.connect(
        "W1",
        "X1",
        PinSelection::pins([1, 2, 3, 4]),
        PinSelection::Auto,
        "X2",
        PinSelection::pins([1, 2, 4, 3]),
    )?;

    println!("{}", harness.create_graph()?.to_dot());

    if let Some(name) = std::env::args().nth(1) {
        let path = harness.output(&name, OutputFormat::Pdf, false)?;
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}
