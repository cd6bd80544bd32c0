//! Windows virtual-key codes.
//!
//! The numpad Enter key shares `VK_RETURN` and is reported as `"Return"`.

pub(super) fn key_name(code: u32) -> Option<&'static str> {
    let name = match code {
        // Modifiers. Only the sided codes; the generic VK_SHIFT, VK_CONTROL
        // and VK_MENU do not say which key it was.
        0xA0 => "LeftShift",    // VK_LSHIFT
        0xA1 => "RightShift",   // VK_RSHIFT
        0xA2 => "LeftControl",  // VK_LCONTROL
        0xA3 => "RightControl", // VK_RCONTROL
        0xA4 => "LeftAlt",      // VK_LMENU
        0xA5 => "RightAlt",     // VK_RMENU
        0x5B => "LeftSuper",    // VK_LWIN
        0x5C => "RightSuper",   // VK_RWIN

        // Function keys
        0x70 => "F1",
        0x71 => "F2",
        0x72 => "F3",
        0x73 => "F4",
        0x74 => "F5",
        0x75 => "F6",
        0x76 => "F7",
        0x77 => "F8",
        0x78 => "F9",
        0x79 => "F10",
        0x7A => "F11",
        0x7B => "F12",

        // Editing and navigation
        0x0D => "Return",
        0x08 => "Backspace",
        0x09 => "Tab",
        0x20 => "Space",
        0x1B => "Escape",
        0x14 => "CapsLock",
        0x90 => "NumLock",
        0x91 => "ScrollLock",
        0x13 => "Pause",
        0x2D => "Insert",
        0x2E => "Delete",
        0x24 => "Home",
        0x23 => "End",
        0x21 => "PageUp",
        0x22 => "PageDown",
        0x26 => "Up",
        0x28 => "Down",
        0x25 => "Left",
        0x27 => "Right",

        // Numpad
        0x60 => "Numpad0",
        0x61 => "Numpad1",
        0x62 => "Numpad2",
        0x63 => "Numpad3",
        0x64 => "Numpad4",
        0x65 => "Numpad5",
        0x66 => "Numpad6",
        0x67 => "Numpad7",
        0x68 => "Numpad8",
        0x69 => "Numpad9",
        0x6E => "NumpadDecimal",
        0x6B => "NumpadAdd",
        0x6D => "NumpadSubtract",
        0x6A => "NumpadMultiply",
        0x6F => "NumpadDivide",

        // OEM symbol keys, US layout
        0xBD => "-",
        0xBB => "=",
        0xDB => "[",
        0xDD => "]",
        0xBA => ";",
        0xDE => "'",
        0xC0 => "`",
        0xDC => "\\",
        0xBC => ",",
        0xBE => ".",
        0xBF => "/",

        // Top-row digits
        0x30 => "0",
        0x31 => "1",
        0x32 => "2",
        0x33 => "3",
        0x34 => "4",
        0x35 => "5",
        0x36 => "6",
        0x37 => "7",
        0x38 => "8",
        0x39 => "9",

        // Letters
        0x41 => "A",
        0x42 => "B",
        0x43 => "C",
        0x44 => "D",
        0x45 => "E",
        0x46 => "F",
        0x47 => "G",
        0x48 => "H",
        0x49 => "I",
        0x4A => "J",
        0x4B => "K",
        0x4C => "L",
        0x4D => "M",
        0x4E => "N",
        0x4F => "O",
        0x50 => "P",
        0x51 => "Q",
        0x52 => "R",
        0x53 => "S",
        0x54 => "T",
        0x55 => "U",
        0x56 => "V",
        0x57 => "W",
        0x58 => "X",
        0x59 => "Y",
        0x5A => "Z",

        _ => return None,
    };
    Some(name)
}
