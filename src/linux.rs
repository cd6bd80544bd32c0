//! Linux key source using evdev.

use crate::event::RawKeyEvent;
use crate::source::KeySource;
use anyhow::{anyhow, Context, Result};
use evdev::{Device, InputEventKind};
use nix::fcntl::{fcntl, FcntlArg, OFlag};
use std::collections::HashSet;
use std::os::fd::AsRawFd;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Minimum interval between keyboard rescans after a read error.
const RESCAN_INTERVAL: Duration = Duration::from_secs(3);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Find all keyboard devices in /dev/input.
pub fn find_keyboards() -> Result<Vec<Device>> {
    let mut keyboards = Vec::new();

    for entry in std::fs::read_dir("/dev/input").context("Failed to read /dev/input")? {
        let path = entry?.path();

        let is_event_node = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("event"));
        if !is_event_node {
            continue;
        }

        if let Ok(device) = Device::open(&path) {
            let has_letters = device
                .supported_keys()
                .is_some_and(|keys| keys.contains(evdev::Key::KEY_A));
            if has_letters {
                log::debug!("Found keyboard: {:?} at {:?}", device.name(), path);
                keyboards.push(device);
            }
        }
    }

    if keyboards.is_empty() {
        Err(anyhow!(
            "No keyboards found. Make sure you're in the 'input' group or running as root."
        ))
    } else {
        Ok(keyboards)
    }
}

fn set_nonblocking(keyboards: &[Device]) -> Result<()> {
    for device in keyboards {
        let fd = device.as_raw_fd();
        let flags = fcntl(fd, FcntlArg::F_GETFL).context("Failed to get fd flags")?;
        let flags = OFlag::from_bits_truncate(flags) | OFlag::O_NONBLOCK;
        fcntl(fd, FcntlArg::F_SETFL(flags)).context("Failed to set non-blocking")?;
    }
    Ok(())
}

fn would_block(e: &std::io::Error) -> bool {
    e.raw_os_error() == Some(libc::EAGAIN) || e.raw_os_error() == Some(libc::EWOULDBLOCK)
}

/// Drain queued events so a freshly opened device starts from a clean slate.
/// Bluetooth keyboards in particular replay input after reconnecting.
fn drain_events(keyboards: &mut [Device]) {
    for device in keyboards.iter_mut() {
        let device_name = device.name().map(String::from);
        loop {
            match device.fetch_events() {
                Ok(events) => {
                    let count = events.count();
                    if count == 0 {
                        break;
                    }
                    log::debug!("Drained {} stale events from {:?}", count, device_name);
                }
                Err(e) => {
                    if !would_block(&e) {
                        log::debug!("Error draining events from {:?}: {}", device_name, e);
                    }
                    break;
                }
            }
        }
    }
}

/// Opens every keyboard and prepares it for polling.
fn open_keyboards() -> Result<Vec<Device>> {
    let mut keyboards = find_keyboards()?;
    set_nonblocking(&keyboards)?;
    drain_events(&mut keyboards);
    Ok(keyboards)
}

/// Reads key events from every keyboard under /dev/input.
///
/// Reading works under both X11 and Wayland but needs permission to open the
/// event devices (root or membership in the `input` group). Devices that fail
/// are rescanned periodically, so unplugging and replugging a keyboard is
/// survived.
pub struct EvdevSource {
    keyboards: Vec<Device>,
    /// Codes currently down, so they can be released if their device is lost.
    pressed: HashSet<u16>,
}

impl EvdevSource {
    /// Open all keyboards. Fails when none can be read.
    pub fn open() -> Result<Self> {
        let keyboards = open_keyboards()?;
        log::info!("Listening on {} keyboard(s)", keyboards.len());
        Ok(Self {
            keyboards,
            pressed: HashSet::new(),
        })
    }

    /// Release everything we reported as pressed.
    fn release_all(&mut self, sink: &mut dyn FnMut(RawKeyEvent)) {
        for code in self.pressed.drain() {
            sink(RawKeyEvent::up(u32::from(code)));
        }
    }

    fn rescan(&mut self, sink: &mut dyn FnMut(RawKeyEvent)) -> bool {
        log::info!("Keyboard error detected, rescanning devices...");
        let mut keyboards = match find_keyboards() {
            Ok(keyboards) => keyboards,
            Err(e) => {
                log::warn!("Failed to rescan keyboards: {}", e);
                return false;
            }
        };

        // Give devices time to fully initialize (especially BT keyboards)
        thread::sleep(Duration::from_millis(100));

        if let Err(e) = set_nonblocking(&keyboards) {
            log::warn!("Failed to set non-blocking on new keyboards: {}", e);
            return false;
        }

        log::info!("Keyboards reconnected: found {} device(s)", keyboards.len());
        for kb in &keyboards {
            log::debug!(
                "  - {:?} ({})",
                kb.name().unwrap_or("unknown"),
                kb.physical_path().unwrap_or("no path")
            );
        }
        drain_events(&mut keyboards);
        self.keyboards = keyboards;
        self.release_all(sink);
        true
    }
}

impl KeySource for EvdevSource {
    fn run(&mut self, running: &AtomicBool, sink: &mut dyn FnMut(RawKeyEvent)) -> Result<()> {
        let mut last_rescan = Instant::now();
        let mut had_error = false;

        while running.load(Ordering::Relaxed) {
            if had_error && last_rescan.elapsed() >= RESCAN_INTERVAL {
                had_error = !self.rescan(sink);
                last_rescan = Instant::now();
            }

            for device in self.keyboards.iter_mut() {
                match device.fetch_events() {
                    Ok(events) => {
                        for event in events {
                            let InputEventKind::Key(key) = event.kind() else {
                                continue;
                            };
                            let code = key.code();
                            // 1 = press, 2 = auto-repeat, 0 = release
                            match event.value() {
                                1 | 2 => {
                                    self.pressed.insert(code);
                                    sink(RawKeyEvent::down(u32::from(code)));
                                }
                                0 => {
                                    self.pressed.remove(&code);
                                    sink(RawKeyEvent::up(u32::from(code)));
                                }
                                _ => {}
                            }
                        }
                    }
                    Err(e) => {
                        if !would_block(&e) {
                            log::debug!("Keyboard read error: {}", e);
                            had_error = true;
                        }
                    }
                }
            }

            thread::sleep(POLL_INTERVAL);
        }

        Ok(())
    }
}
