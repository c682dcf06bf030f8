//! Stored-entry zip archives.
//!
//! Writes the minimal subset of the zip format the download handler needs:
//! method 0 (stored) entries with CRC-32 checksums, one local file header
//! per entry, a central directory and the end-of-central-directory record.
//! Banners are short text; compression would buy nothing.

const LOCAL_HEADER_SIG: u32 = 0x0403_4b50;
const CENTRAL_HEADER_SIG: u32 = 0x0201_4b50;
const EOCD_SIG: u32 = 0x0605_4b50;

/// Version 1.0 - stored entries need nothing newer.
const VERSION_NEEDED: u16 = 10;
const METHOD_STORED: u16 = 0;

const CRC32_POLYNOMIAL: u32 = 0xEDB8_8320;
const CRC32_TABLE: [u32; 256] = generate_table();

const fn generate_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut j = 0;
        while j < 8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ CRC32_POLYNOMIAL;
            } else {
                crc >>= 1;
            }
            j += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// CRC-32 (reflected, IEEE polynomial) as the zip format requires.
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        let index = ((crc ^ byte as u32) & 0xFF) as usize;
        crc = (crc >> 8) ^ CRC32_TABLE[index];
    }
    !crc
}

/// Build a zip archive holding `entries` as stored files.
///
/// Timestamps are zeroed; the archive is a transient download artifact, not
/// a backup.
pub fn write_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut central = Vec::new();

    for (name, data) in entries {
        let offset = out.len() as u32;
        let crc = crc32(data);
        let size = data.len() as u32;
        let name_bytes = name.as_bytes();

        // Local file header
        push_u32(&mut out, LOCAL_HEADER_SIG);
        push_u16(&mut out, VERSION_NEEDED);
        push_u16(&mut out, 0); // flags
        push_u16(&mut out, METHOD_STORED);
        push_u16(&mut out, 0); // mod time
        push_u16(&mut out, 0); // mod date
        push_u32(&mut out, crc);
        push_u32(&mut out, size); // compressed size == size for stored
        push_u32(&mut out, size);
        push_u16(&mut out, name_bytes.len() as u16);
        push_u16(&mut out, 0); // extra length
        out.extend_from_slice(name_bytes);
        out.extend_from_slice(data);

        // Central directory entry
        push_u32(&mut central, CENTRAL_HEADER_SIG);
        push_u16(&mut central, VERSION_NEEDED); // version made by
        push_u16(&mut central, VERSION_NEEDED);
        push_u16(&mut central, 0); // flags
        push_u16(&mut central, METHOD_STORED);
        push_u16(&mut central, 0); // mod time
        push_u16(&mut central, 0); // mod date
        push_u32(&mut central, crc);
        push_u32(&mut central, size);
        push_u32(&mut central, size);
        push_u16(&mut central, name_bytes.len() as u16);
        push_u16(&mut central, 0); // extra length
        push_u16(&mut central, 0); // comment length
        push_u16(&mut central, 0); // disk number start
        push_u16(&mut central, 0); // internal attributes
        push_u32(&mut central, 0); // external attributes
        push_u32(&mut central, offset);
        central.extend_from_slice(name_bytes);
    }

    let central_offset = out.len() as u32;
    let central_size = central.len() as u32;
    out.extend_from_slice(&central);

    // End of central directory
    push_u32(&mut out, EOCD_SIG);
    push_u16(&mut out, 0); // disk number
    push_u16(&mut out, 0); // central directory disk
    push_u16(&mut out, entries.len() as u16);
    push_u16(&mut out, entries.len() as u16);
    push_u32(&mut out, central_size);
    push_u32(&mut out, central_offset);
    push_u16(&mut out, 0); // comment length

    out
}

fn push_u16(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn push_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}
