use pnet::util::MacAddr;

/// Maps a MAC address to the organization that registered its OUI.
pub trait VendorRepository: Send + Sync {
    fn get_vendor(&self, mac: MacAddr) -> Option<String>;
}
