//! Solidity contract ABI encoding and decoding.
//!
//! Values are modeled as an [`AbiValue`] tree with a parallel [`AbiType`]
//! description. Encoding follows the Solidity head/tail scheme: static
//! values occupy their padded words in the head, dynamic values leave a
//! byte offset in the head and append their payload to the tail. The
//! decoder is strict: offsets must stay inside the input, declared lengths
//! must fit, and padding bytes that should be zero must be zero.
//!
//! [`Function`] and [`Event`] tie the codec to selectors and topics:
//!
//! ```
//! use alloy_primitives::U256;
//! use quill_abi::{AbiType, AbiValue, Function};
//! use quill_primitives::Address;
//!
//! let transfer = Function::new("transfer", vec![AbiType::Address, AbiType::Uint(256)])
//!     .returns(vec![AbiType::Bool]);
//! assert_eq!(transfer.selector(), [0xa9, 0x05, 0x9c, 0xbb]);
//!
//! let calldata = transfer
//!     .encode_call(&[
//!         AbiValue::Address(Address::ZERO),
//!         AbiValue::uint(256, U256::from(1u64)).unwrap(),
//!     ])
//!     .unwrap();
//! assert_eq!(calldata.len(), 4 + 64);
//! ```

pub mod decode;
pub mod encode;
pub mod error;
pub mod event;
pub mod function;
pub mod types;
pub mod value;

pub use decode::decode;
pub use encode::encode;
pub use error::AbiError;
pub use event::{Event, EventParam};
pub use function::Function;
pub use types::AbiType;
pub use value::AbiValue;
