//! End-to-end scenarios for the device session, driven through fakes for adb,
//! the mDNS daemon and, where it matters, a real line prompt over scripted input.


#[cfg(test)]
mod session;
