#![no_main]
use libfuzzer_sys::fuzz_target;
use ndn_wire::{
    Block, Certificate, CertificateRecord, ErrorRecord, IdentityRecord, KeyLocator, Name,
    NameListRecord, PublicKeyRecord, SignatureInfo, UserRecord,
};

fuzz_target!(|data: &[u8]| {
    let Ok(mut block) = Block::from_slice(data) else {
        return;
    };
    let _ = block.parse();

    let _ = IdentityRecord::default().wire_decode(&block);
    let _ = PublicKeyRecord::default().wire_decode(&block);
    let _ = CertificateRecord::default().wire_decode(&block);
    let _ = NameListRecord::default().wire_decode(&block);
    let _ = ErrorRecord::default().wire_decode(&block);
    let _ = UserRecord::default().wire_decode(&block);
    let _ = Name::default().wire_decode(&block);
    let _ = KeyLocator::digest(Vec::new()).wire_decode(&block);
    let _ = Certificate::from_block(&block);
    let _ = SignatureInfo::from_block(&block);
});
