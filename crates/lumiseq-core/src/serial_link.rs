use std::io::Write;
use std::time::Duration;

use log::{debug, info};
use serialport::{SerialPort, SerialPortInfo};

use crate::error::LinkError;

/// Write timeout, generous enough for the largest possible frame at the
/// fixed baud rate.
const WRITE_TIMEOUT: Duration = Duration::from_secs(1);

/// A port known to the OS, reduced to what an operator needs to pick one.
#[derive(Debug, Clone)]
pub struct PortInfo {
    pub port_name: String,
    pub port_type: String,
}

impl From<SerialPortInfo> for PortInfo {
    fn from(info: SerialPortInfo) -> Self {
        let port_type = match &info.port_type {
            serialport::SerialPortType::UsbPort(usb) => match &usb.product {
                Some(product) => format!("USB: {product}"),
                None => "USB".to_string(),
            },
            serialport::SerialPortType::PciPort => "PCI".to_string(),
            serialport::SerialPortType::BluetoothPort => "Bluetooth".to_string(),
            serialport::SerialPortType::Unknown => "Unknown".to_string(),
        };
        Self {
            port_name: info.port_name,
            port_type,
        }
    }
}

/// Serial parameters for a controller link.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    pub port_name: String,
    pub baud_rate: u32,
    pub data_bits: serialport::DataBits,
    pub parity: serialport::Parity,
    pub stop_bits: serialport::StopBits,
    pub flow_control: serialport::FlowControl,
}

impl LinkConfig {
    /// The settings the controller firmware listens with: 115200 baud,
    /// 8 data bits, no parity, one stop bit, no flow control.
    pub fn new(port_name: impl Into<String>) -> Self {
        Self {
            port_name: port_name.into(),
            baud_rate: 115_200,
            data_bits: serialport::DataBits::Eight,
            parity: serialport::Parity::None,
            stop_bits: serialport::StopBits::One,
            flow_control: serialport::FlowControl::None,
        }
    }
}

/// An open one-way link to the controller.
///
/// Dropping the link closes the underlying port, on the success path and
/// on every error path alike.
pub struct SerialLink {
    port: Box<dyn SerialPort>,
}

impl SerialLink {
    /// Ports currently known to the OS.
    pub fn list_ports() -> Vec<PortInfo> {
        serialport::available_ports()
            .unwrap_or_default()
            .into_iter()
            .map(PortInfo::from)
            .collect()
    }

    /// Opens `cfg.port_name` with the configured settings.
    pub fn open(cfg: &LinkConfig) -> Result<Self, LinkError> {
        let port = serialport::new(&cfg.port_name, cfg.baud_rate)
            .data_bits(cfg.data_bits)
            .parity(cfg.parity)
            .stop_bits(cfg.stop_bits)
            .flow_control(cfg.flow_control)
            .timeout(WRITE_TIMEOUT)
            .open()
            .map_err(|source| LinkError::Open {
                port: cfg.port_name.clone(),
                source,
            })?;
        info!("opened {} at {} baud", cfg.port_name, cfg.baud_rate);
        Ok(Self { port })
    }

    /// Writes the whole buffer in order and flushes it out of the OS
    /// queue before returning.
    pub fn send(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        self.port.write_all(bytes)?;
        self.port.flush()?;
        debug!("wrote {} bytes", bytes.len());
        Ok(())
    }
}
