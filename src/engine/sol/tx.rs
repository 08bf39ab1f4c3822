// Raw Solana transaction handling.
// compact-u16 codec, legacy message builder, slot signing (legacy and
// versioned v0), ATA derivation, pubkey decoding.

use ed25519_dalek::{Signer, SigningKey};
use log::info;

use crate::atoms::constants::ATA_PROGRAM_ID;
use crate::atoms::error::{LaunchError, LaunchResult};

// ── Pubkeys ────────────────────────────────────────────────────────────────

/// Decode a base58 address into its 32 raw bytes.
pub(crate) fn decode_pubkey(address: &str) -> LaunchResult<[u8; 32]> {
    let bytes = bs58::decode(address.trim())
        .into_vec()
        .map_err(|e| LaunchError::Other(format!("Invalid address '{}': {}", address, e)))?;
    if bytes.len() != 32 {
        return Err(LaunchError::Other(format!(
            "Invalid address length: expected 32 bytes, got {}",
            bytes.len()
        )));
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    Ok(out)
}

// ── Compact-u16 ────────────────────────────────────────────────────────────

/// Decode Solana compact-u16. Returns (value, bytes_consumed).
pub(crate) fn decode_compact_u16(data: &[u8]) -> LaunchResult<(u16, usize)> {
    if data.is_empty() {
        return Err(LaunchError::Other("Empty data for compact-u16".into()));
    }

    let first = data[0] as u16;
    if first < 0x80 {
        return Ok((first, 1));
    }

    if data.len() < 2 {
        return Err(LaunchError::Other("Truncated compact-u16".into()));
    }
    let second = data[1] as u16;
    if second < 0x80 {
        return Ok(((first & 0x7F) | (second << 7), 2));
    }

    if data.len() < 3 {
        return Err(LaunchError::Other("Truncated compact-u16".into()));
    }
    let third = data[2] as u16;
    Ok(((first & 0x7F) | ((second & 0x7F) << 7) | (third << 14), 3))
}

/// Encode a compact-u16 value (Solana serialization).
pub(crate) fn encode_compact_u16(val: u16) -> Vec<u8> {
    if val < 0x80 {
        vec![val as u8]
    } else if val < 0x4000 {
        vec![(val & 0x7F | 0x80) as u8, (val >> 7) as u8]
    } else {
        vec![
            (val & 0x7F | 0x80) as u8,
            ((val >> 7) & 0x7F | 0x80) as u8,
            (val >> 14) as u8,
        ]
    }
}

// ── Legacy message builder ─────────────────────────────────────────────────

/// Build a legacy transaction from scratch (zeroed signature slots + message).
/// accounts: (pubkey_bytes, is_signer, is_writable) — signers first.
/// instructions: (program_id_index, account_indices, data).
pub(crate) fn build_transaction(
    recent_blockhash: &[u8; 32],
    accounts: &[([u8; 32], bool, bool)],
    instructions: &[(u8, Vec<u8>, Vec<u8>)],
) -> Vec<u8> {
    let num_signers = accounts.iter().filter(|(_, s, _)| *s).count() as u8;
    let num_readonly_signed = accounts.iter().filter(|(_, s, w)| *s && !*w).count() as u8;
    let num_readonly_unsigned = accounts.iter().filter(|(_, s, w)| !*s && !*w).count() as u8;

    let mut message = Vec::new();
    // Header: num_required_signatures, num_readonly_signed, num_readonly_unsigned
    message.push(num_signers);
    message.push(num_readonly_signed);
    message.push(num_readonly_unsigned);

    message.extend_from_slice(&encode_compact_u16(accounts.len() as u16));
    for (pubkey, _, _) in accounts {
        message.extend_from_slice(pubkey);
    }

    message.extend_from_slice(recent_blockhash);

    message.extend_from_slice(&encode_compact_u16(instructions.len() as u16));
    for (program_id_idx, acct_indices, data) in instructions {
        message.push(*program_id_idx);
        message.extend_from_slice(&encode_compact_u16(acct_indices.len() as u16));
        message.extend_from_slice(acct_indices);
        message.extend_from_slice(&encode_compact_u16(data.len() as u16));
        message.extend_from_slice(data);
    }

    // Full transaction: num_signatures (compact-u16) + zeroed slots + message
    let mut tx = Vec::new();
    tx.extend_from_slice(&encode_compact_u16(num_signers as u16));
    for _ in 0..num_signers {
        tx.extend_from_slice(&[0u8; 64]);
    }
    tx.extend_from_slice(&message);
    tx
}

// ── Signing ────────────────────────────────────────────────────────────────

/// Locate the signature region of a serialized transaction.
/// Returns (version_prefix_len, num_sigs, sigs_start, message_start).
fn signature_region(tx_bytes: &[u8]) -> LaunchResult<(usize, u16, usize, usize)> {
    if tx_bytes.is_empty() {
        return Err(LaunchError::Other("Empty transaction".into()));
    }
    // High bit on byte 0 marks a versioned transaction prefix.
    let prefix_len = if tx_bytes[0] >= 0x80 { 1usize } else { 0usize };
    let (num_sigs, header_len) = decode_compact_u16(&tx_bytes[prefix_len..])?;
    if num_sigs == 0 {
        return Err(LaunchError::Other("Transaction has 0 signatures required".into()));
    }
    let sigs_start = prefix_len + header_len;
    let message_start = sigs_start + num_sigs as usize * 64;
    if message_start > tx_bytes.len() {
        return Err(LaunchError::Other(format!(
            "Transaction too short: need {} bytes for {} signatures, have {}",
            message_start,
            num_sigs,
            tx_bytes.len()
        )));
    }
    Ok((prefix_len, num_sigs, sigs_start, message_start))
}

/// Sign one signature slot of a serialized transaction (legacy or v0).
/// The wallet signs slot 0; auxiliary keypairs (the mint) sign their own
/// slot — the equivalent of a partial sign.
pub(crate) fn sign_slot(tx_bytes: &[u8], slot: usize, secret_key: &[u8; 32]) -> LaunchResult<Vec<u8>> {
    let (prefix_len, num_sigs, sigs_start, message_start) = signature_region(tx_bytes)?;
    if slot >= num_sigs as usize {
        return Err(LaunchError::Other(format!(
            "Signature slot {} out of range ({} required)",
            slot, num_sigs
        )));
    }

    let signing_key = SigningKey::from_bytes(secret_key);
    let message = &tx_bytes[message_start..];

    // Versioned transactions sign [version_prefix] + [message].
    let signature = if prefix_len == 1 {
        let mut signable = Vec::with_capacity(1 + message.len());
        signable.push(tx_bytes[0]);
        signable.extend_from_slice(message);
        signing_key.sign(&signable)
    } else {
        signing_key.sign(message)
    };

    let mut signed = tx_bytes.to_vec();
    let start = sigs_start + slot * 64;
    signed[start..start + 64].copy_from_slice(&signature.to_bytes());

    info!(
        "[sol] Signed slot {} of {} (versioned={}, msg_len={})",
        slot,
        num_sigs,
        prefix_len == 1,
        message.len()
    );

    Ok(signed)
}

// ── Associated token accounts ──────────────────────────────────────────────

/// Derive the Associated Token Account address:
/// PDA of [wallet, token_program, mint] under the ATA program.
pub(crate) fn derive_ata(
    wallet: &[u8; 32],
    mint: &[u8; 32],
    token_program: &[u8; 32],
) -> LaunchResult<[u8; 32]> {
    use sha2::Digest;
    let ata_program = decode_pubkey(ATA_PROGRAM_ID)?;

    // Bump search from 255 down; a valid PDA must not be on the ed25519 curve.
    for bump in (0u8..=255).rev() {
        let mut hasher = sha2::Sha256::new();
        hasher.update(wallet);
        hasher.update(token_program);
        hasher.update(mint);
        hasher.update([bump]);
        hasher.update(ata_program);
        hasher.update(b"ProgramDerivedAddress");
        let hash = hasher.finalize();

        let point_bytes: [u8; 32] = hash[..32]
            .try_into()
            .map_err(|_| LaunchError::Other("PDA hash truncation".into()))?;
        if ed25519_dalek::VerifyingKey::from_bytes(&point_bytes).is_err() {
            return Ok(point_bytes);
        }
    }
    Err(LaunchError::Other("Could not derive ATA address".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::constants::TOKEN_PROGRAM_ID;

    #[test]
    fn test_compact_u16_round_trip() {
        for val in [0u16, 1, 0x7F, 0x80, 0x3FFF, 0x4000, u16::MAX] {
            let encoded = encode_compact_u16(val);
            let (decoded, consumed) = decode_compact_u16(&encoded).unwrap();
            assert_eq!(decoded, val);
            assert_eq!(consumed, encoded.len());
        }
    }

    #[test]
    fn test_decode_compact_u16_rejects_truncated() {
        assert!(decode_compact_u16(&[]).is_err());
        assert!(decode_compact_u16(&[0x80]).is_err());
        assert!(decode_compact_u16(&[0x80, 0x80]).is_err());
    }

    #[test]
    fn test_build_transaction_layout() {
        let blockhash = [7u8; 32];
        let payer = [1u8; 32];
        let other = [2u8; 32];
        let program = [3u8; 32];
        let accounts = vec![(payer, true, true), (other, false, true), (program, false, false)];
        let instructions = vec![(2u8, vec![0u8, 1], vec![9, 9, 9])];
        let tx = build_transaction(&blockhash, &accounts, &instructions);

        // One signer: [1][64 zero bytes][header…]
        assert_eq!(tx[0], 1);
        assert!(tx[1..65].iter().all(|b| *b == 0));
        // Header: 1 signer, 0 readonly signed, 1 readonly unsigned
        assert_eq!(&tx[65..68], &[1, 0, 1]);
        // 3 account keys follow
        assert_eq!(tx[68], 3);
        assert_eq!(&tx[69..101], &payer);
    }

    #[test]
    fn test_sign_slot_fills_requested_slot_only() {
        let blockhash = [0u8; 32];
        let a = [1u8; 32];
        let b = [2u8; 32];
        let accounts = vec![(a, true, true), (b, true, true)];
        let tx = build_transaction(&blockhash, &accounts, &[]);
        let secret = [42u8; 32];
        let signed = sign_slot(&tx, 1, &secret).unwrap();
        // Slot 0 untouched, slot 1 nonzero.
        assert!(signed[1..65].iter().all(|x| *x == 0));
        assert!(signed[65..129].iter().any(|x| *x != 0));
        // Out-of-range slot rejected.
        assert!(sign_slot(&tx, 2, &secret).is_err());
    }

    #[test]
    fn test_derive_ata_is_deterministic_and_off_curve() {
        let wallet = [5u8; 32];
        let mint = [6u8; 32];
        let token_program = decode_pubkey(TOKEN_PROGRAM_ID).unwrap();
        let a = derive_ata(&wallet, &mint, &token_program).unwrap();
        let b = derive_ata(&wallet, &mint, &token_program).unwrap();
        assert_eq!(a, b);
        assert!(ed25519_dalek::VerifyingKey::from_bytes(&a).is_err());
    }

    #[test]
    fn test_decode_pubkey_validates_length() {
        assert!(decode_pubkey(TOKEN_PROGRAM_ID).is_ok());
        assert!(decode_pubkey("abc").is_err());
        assert!(decode_pubkey("not-base58-0OIl").is_err());
    }
}
