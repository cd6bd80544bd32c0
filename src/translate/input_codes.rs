//! Linux input-event codes (`linux/input-event-codes.h`).

pub(super) fn key_name(code: u32) -> Option<&'static str> {
    let name = match code {
        // Modifiers
        42 => "LeftShift",    // KEY_LEFTSHIFT
        54 => "RightShift",   // KEY_RIGHTSHIFT
        29 => "LeftControl",  // KEY_LEFTCTRL
        97 => "RightControl", // KEY_RIGHTCTRL
        56 => "LeftAlt",      // KEY_LEFTALT
        100 => "RightAlt",    // KEY_RIGHTALT
        125 => "LeftSuper",   // KEY_LEFTMETA
        126 => "RightSuper",  // KEY_RIGHTMETA

        // Function keys
        59 => "F1",
        60 => "F2",
        61 => "F3",
        62 => "F4",
        63 => "F5",
        64 => "F6",
        65 => "F7",
        66 => "F8",
        67 => "F9",
        68 => "F10",
        87 => "F11",
        88 => "F12",

        // Editing and navigation
        28 => "Return",
        14 => "Backspace",
        15 => "Tab",
        57 => "Space",
        1 => "Escape",
        58 => "CapsLock",
        69 => "NumLock",
        70 => "ScrollLock",
        119 => "Pause",
        110 => "Insert",
        111 => "Delete",
        102 => "Home",
        107 => "End",
        104 => "PageUp",
        109 => "PageDown",
        103 => "Up",
        108 => "Down",
        105 => "Left",
        106 => "Right",

        // Numpad
        82 => "Numpad0",
        79 => "Numpad1",
        80 => "Numpad2",
        81 => "Numpad3",
        75 => "Numpad4",
        76 => "Numpad5",
        77 => "Numpad6",
        71 => "Numpad7",
        72 => "Numpad8",
        73 => "Numpad9",
        83 => "NumpadDecimal",
        78 => "NumpadAdd",
        74 => "NumpadSubtract",
        55 => "NumpadMultiply",
        98 => "NumpadDivide",
        96 => "NumpadEnter",

        // Symbols, unshifted
        12 => "-",
        13 => "=",
        26 => "[",
        27 => "]",
        39 => ";",
        40 => "'",
        41 => "`",
        43 => "\\",
        51 => ",",
        52 => ".",
        53 => "/",

        // Top-row digits
        11 => "0",
        2 => "1",
        3 => "2",
        4 => "3",
        5 => "4",
        6 => "5",
        7 => "6",
        8 => "7",
        9 => "8",
        10 => "9",

        // Letters, by physical position
        30 => "A",
        48 => "B",
        46 => "C",
        32 => "D",
        18 => "E",
        33 => "F",
        34 => "G",
        35 => "H",
        23 => "I",
        36 => "J",
        37 => "K",
        38 => "L",
        50 => "M",
        49 => "N",
        24 => "O",
        25 => "P",
        16 => "Q",
        19 => "R",
        31 => "S",
        20 => "T",
        22 => "U",
        47 => "V",
        17 => "W",
        45 => "X",
        21 => "Y",
        44 => "Z",

        _ => return None,
    };
    Some(name)
}
