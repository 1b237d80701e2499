//! Windows Installer session backed by an `MSIHANDLE`.
#![allow(unsafe_code)]

use super::{Button, Buttons, Session};
use crate::error::{Error, Result};
use windows::Win32::Foundation::{ERROR_MORE_DATA, ERROR_SUCCESS};
use windows::Win32::System::ApplicationInstallationAndServicing::{
    INSTALLMESSAGE, INSTALLMESSAGE_INFO, INSTALLMESSAGE_USER, MSIHANDLE, MsiCloseHandle,
    MsiCreateRecord, MsiGetPropertyW, MsiProcessMessage, MsiRecordSetStringW,
};
use windows::core::{HSTRING, PCWSTR, PWSTR};

// MessageBox style and result values understood by INSTALLMESSAGE_USER.
const MB_OK: i32 = 0x0;
const MB_OKCANCEL: i32 = 0x1;
const IDCANCEL: i32 = 2;

/// Session handed to an exported entry point by the installer engine.
///
/// The handle is owned by the engine and is not closed here.
pub struct MsiSession {
    handle: MSIHANDLE,
}

impl MsiSession {
    /// Wrap the handle passed to a custom action.
    pub fn new(handle: MSIHANDLE) -> Self {
        Self { handle }
    }

    /// Send a one-field record through `MsiProcessMessage`.
    ///
    /// Field 0 is the `[1]` template so the text itself is never
    /// interpreted as formatting.
    fn process_message(&self, kind: INSTALLMESSAGE, text: &str) -> Result<i32> {
        let record = Record::with_text(text)?;
        let rc = unsafe { MsiProcessMessage(self.handle, kind, record.0) };
        if rc < 0 {
            return Err(Error::Host {
                call: "MsiProcessMessage",
                code: rc,
            });
        }
        Ok(rc)
    }
}

impl Session for MsiSession {
    fn log(&self, message: &str) {
        log::debug!("{message}");
        if let Err(e) = self.process_message(INSTALLMESSAGE_INFO, message) {
            log::warn!("Unable to write installer log line: {e}");
        }
    }

    fn property(&self, name: &str) -> Result<String> {
        let wide_name = HSTRING::from(name);
        let mut empty = [0u16; 1];
        let mut len: u32 = 0;
        let rc = unsafe {
            MsiGetPropertyW(
                self.handle,
                PCWSTR(wide_name.as_ptr()),
                Some(PWSTR(empty.as_mut_ptr())),
                Some(&mut len),
            )
        };
        if rc == ERROR_SUCCESS.0 {
            return Ok(String::new());
        }
        if rc != ERROR_MORE_DATA.0 {
            return Err(Error::Property {
                name: name.to_string(),
                code: rc,
            });
        }

        // len excludes the terminating NUL
        len += 1;
        let mut buf = vec![0u16; len as usize];
        let rc = unsafe {
            MsiGetPropertyW(
                self.handle,
                PCWSTR(wide_name.as_ptr()),
                Some(PWSTR(buf.as_mut_ptr())),
                Some(&mut len),
            )
        };
        if rc != ERROR_SUCCESS.0 {
            return Err(Error::Property {
                name: name.to_string(),
                code: rc,
            });
        }
        buf.truncate(len as usize);
        Ok(String::from_utf16_lossy(&buf))
    }

    fn message_box(&self, text: &str, buttons: Buttons) -> Result<Button> {
        let style = match buttons {
            Buttons::Ok => MB_OK,
            Buttons::OkCancel => MB_OKCANCEL,
        };
        let kind = INSTALLMESSAGE(INSTALLMESSAGE_USER.0 | style);
        match self.process_message(kind, text)? {
            IDCANCEL => Ok(Button::Cancel),
            _ => Ok(Button::Ok),
        }
    }
}

/// Owned MSI record handle, closed on drop.
struct Record(MSIHANDLE);

impl Record {
    fn with_text(text: &str) -> Result<Self> {
        let handle = unsafe { MsiCreateRecord(1) };
        if handle.0 == 0 {
            return Err(Error::Host {
                call: "MsiCreateRecord",
                code: 0,
            });
        }
        let record = Self(handle);
        record.set(0, "[1]")?;
        record.set(1, text)?;
        Ok(record)
    }

    fn set(&self, field: u32, value: &str) -> Result<()> {
        let wide = HSTRING::from(value);
        let rc = unsafe { MsiRecordSetStringW(self.0, field, PCWSTR(wide.as_ptr())) };
        if rc != ERROR_SUCCESS.0 {
            return Err(Error::Host {
                call: "MsiRecordSetStringW",
                code: rc as i32,
            });
        }
        Ok(())
    }
}

impl Drop for Record {
    fn drop(&mut self) {
        unsafe {
            MsiCloseHandle(self.0);
        }
    }
}
