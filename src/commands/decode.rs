//! Register decode command

use pinprobe_core::register::decode_pad_register;

/// Print the decoded fields of one pad control register value
pub fn print_decode(value: u32) {
    let decoded = decode_pad_register(value);

    println!(
        "Register value:  0x{:08X} ({:012b} binary, low 12 bits)",
        value,
        value & 0xFFF
    );
    println!("Mode:            {}", decoded.mode);
    if let Some(direction) = decoded.direction {
        println!("Direction:       {}", direction);
    }
    println!("Input enable:    {}", on_off(decoded.input_enable));
    println!("Tristate:        {}", on_off(decoded.tristate));
    println!("Pull:            {}", decoded.pull);
    println!("Low power:       {}", on_off(decoded.low_power));
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}
