//! Serial port transport
//!
//! Port discovery and a [`StitchSink`] that writes one `G1` line per stitch
//! to a stitching controller over USB or RS-232.

use std::io::Write;
use std::time::Duration;

use stitchkit_core::TransportError;
use stitchkit_designer::gcode::{format_move, PROGRAM_END};

use super::{ConnectionParams, StitchSink};

/// Information about an available serial port
#[derive(Debug, Clone)]
pub struct SerialPortInfo {
    /// Port name (e.g., "/dev/ttyUSB0", "COM3")
    pub port_name: String,

    /// Port description (e.g., "USB Serial Port")
    pub description: String,

    /// Manufacturer name if available
    pub manufacturer: Option<String>,

    /// USB vendor ID if applicable
    pub vid: Option<u16>,

    /// USB product ID if applicable
    pub pid: Option<u16>,
}

impl SerialPortInfo {
    pub fn new(port_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            port_name: port_name.into(),
            description: description.into(),
            manufacturer: None,
            vid: None,
            pid: None,
        }
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_usb_ids(mut self, vid: u16, pid: u16) -> Self {
        self.vid = Some(vid);
        self.pid = Some(pid);
        self
    }
}

/// List serial ports that look like a stitching controller.
///
/// Only controller-like names are kept:
/// - Windows: COM* (e.g., COM1, COM3)
/// - Linux: /dev/ttyUSB*, /dev/ttyACM*
/// - macOS: /dev/cu.usbserial-*, /dev/cu.usbmodem*
pub fn list_ports() -> Result<Vec<SerialPortInfo>, TransportError> {
    let ports = serialport::available_ports().map_err(|e| {
        tracing::error!("Failed to enumerate serial ports: {}", e);
        TransportError::Unavailable {
            endpoint: "serial ports".to_string(),
            reason: e.to_string(),
        }
    })?;

    Ok(ports
        .iter()
        .filter(|port| is_controller_port(&port.port_name))
        .map(|port| {
            let info = SerialPortInfo::new(&port.port_name, port_description(port));
            match &port.port_type {
                serialport::SerialPortType::UsbPort(usb_info) => {
                    let info = info.with_usb_ids(usb_info.vid, usb_info.pid);
                    match &usb_info.manufacturer {
                        Some(mfg) => info.with_manufacturer(mfg),
                        None => info,
                    }
                }
                _ => info,
            }
        })
        .collect())
}

/// Check if a port name matches controller patterns
pub fn is_controller_port(port_name: &str) -> bool {
    if let Some(number) = port_name.strip_prefix("COM") {
        return !number.is_empty() && number.chars().all(|c| c.is_ascii_digit());
    }

    port_name.starts_with("/dev/ttyUSB")
        || port_name.starts_with("/dev/ttyACM")
        || port_name.starts_with("/dev/cu.usbserial-")
        || port_name.starts_with("/dev/cu.usbmodem")
}

fn port_description(port: &serialport::SerialPortInfo) -> String {
    match &port.port_type {
        serialport::SerialPortType::UsbPort(usb_info) => {
            format!(
                "USB {} {}",
                usb_info.manufacturer.as_deref().unwrap_or("Device"),
                usb_info.product.as_deref().unwrap_or("Serial Port")
            )
        }
        serialport::SerialPortType::BluetoothPort => "Bluetooth Serial".to_string(),
        serialport::SerialPortType::PciPort => "PCI Serial".to_string(),
        _ => "Serial Port".to_string(),
    }
}

/// Stitch sink on an open serial port
pub struct SerialSink {
    port: Box<dyn serialport::SerialPort>,
    name: String,
}

impl std::fmt::Debug for SerialSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialSink").field("name", &self.name).finish()
    }
}

impl SerialSink {
    /// Open the port and wait `settle_delay_ms` for the controller to reset.
    pub fn open(params: &ConnectionParams) -> Result<Self, TransportError> {
        params.validate()?;

        let port = serialport::new(&params.port, params.baud_rate)
            .timeout(Duration::from_millis(params.timeout_ms))
            .open()
            .map_err(|e| TransportError::Unavailable {
                endpoint: params.port.clone(),
                reason: e.to_string(),
            })?;

        tracing::info!(
            "Opened {} at {} baud, waiting {} ms for the controller",
            params.port,
            params.baud_rate,
            params.settle_delay_ms
        );
        std::thread::sleep(Duration::from_millis(params.settle_delay_ms));

        Ok(Self {
            port,
            name: params.port.clone(),
        })
    }

    fn write_line(&mut self, line: &str) -> Result<(), TransportError> {
        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');

        self.port
            .write_all(&bytes)
            .and_then(|_| self.port.flush())
            .map_err(|e| TransportError::WriteFailed {
                endpoint: self.name.clone(),
                reason: e.to_string(),
            })
    }
}

impl StitchSink for SerialSink {
    fn endpoint(&self) -> &str {
        &self.name
    }

    fn send_coordinate(&mut self, x_mm: f64, y_mm: f64) -> Result<(), TransportError> {
        let command = format_move(x_mm, y_mm);
        self.write_line(&command)?;
        tracing::debug!("{} <- {}", self.name, command);
        Ok(())
    }

    fn end_program(&mut self) -> Result<(), TransportError> {
        self.write_line(PROGRAM_END)?;
        tracing::info!("Program end sent to {}", self.name);
        Ok(())
    }
}

/// Open the controller port, or log a warning and carry on offline.
pub fn connect_or_offline(params: &ConnectionParams) -> Option<SerialSink> {
    match SerialSink::open(params) {
        Ok(sink) => Some(sink),
        Err(e) => {
            tracing::warn!("Controller not connected, working offline: {}", e);
            None
        }
    }
}
