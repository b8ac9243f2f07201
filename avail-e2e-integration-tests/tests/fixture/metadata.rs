#![allow(non_camel_case_types, dead_code)]

use std::collections::BTreeMap;

use frame_metadata::{
    v15::{
        CustomMetadata, ExtrinsicMetadata, OuterEnums, PalletCallMetadata, PalletMetadata,
        RuntimeMetadataV15,
    },
    RuntimeMetadata, RuntimeMetadataPrefixed, META_RESERVED,
};
use parity_scale_codec::Encode;
use scale_info::{meta_type, TypeInfo};

#[derive(TypeInfo)]
enum TimestampCall {
    #[codec(index = 0)]
    set {
        #[codec(compact)]
        now: u64,
    },
}

#[derive(TypeInfo)]
enum DataAvailabilityCall {
    #[codec(index = 0)]
    create_application_key { key: Vec<u8> },
    #[codec(index = 1)]
    submit_data { data: Vec<u8> },
}

#[derive(TypeInfo)]
enum RuntimeCall {
    #[codec(index = 3)]
    Timestamp(TimestampCall),
    #[codec(index = 29)]
    DataAvailability(DataAvailabilityCall),
}

#[derive(TypeInfo)]
enum RuntimeEvent {
    Unused,
}

#[derive(TypeInfo)]
enum RuntimeError {
    Unused,
}

#[derive(TypeInfo)]
struct Runtime;

fn pallet<Call: TypeInfo + 'static>(name: &'static str, index: u8) -> PalletMetadata {
    PalletMetadata {
        name,
        storage: None,
        calls: Some(PalletCallMetadata {
            ty: meta_type::<Call>(),
        }),
        event: None,
        constants: vec![],
        error: None,
        index,
        docs: vec![],
    }
}

/// SCALE encoded V15 metadata of a runtime with the `Timestamp` and
/// `DataAvailability` pallets at the indices the mock node uses.
pub fn runtime_metadata() -> Vec<u8> {
    let metadata = RuntimeMetadataV15::new(
        vec![
            pallet::<TimestampCall>("Timestamp", 3),
            pallet::<DataAvailabilityCall>("DataAvailability", 29),
        ],
        ExtrinsicMetadata {
            version: 4,
            address_ty: meta_type::<[u8; 32]>(),
            call_ty: meta_type::<RuntimeCall>(),
            signature_ty: meta_type::<[u8; 64]>(),
            extra_ty: meta_type::<()>(),
            signed_extensions: vec![],
        },
        meta_type::<Runtime>(),
        vec![],
        OuterEnums {
            call_enum_ty: meta_type::<RuntimeCall>(),
            event_enum_ty: meta_type::<RuntimeEvent>(),
            error_enum_ty: meta_type::<RuntimeError>(),
        },
        CustomMetadata {
            map: BTreeMap::new(),
        },
    );
    RuntimeMetadataPrefixed(META_RESERVED, RuntimeMetadata::V15(metadata)).encode()
}
