/*++

Licensed under the Apache-2.0 license.

File Name:

    rsa_pss_kat.rs

Abstract:

    File contains the Known Answer Test (KAT) for RSA-3072 PSS signing and
    verification with SHA-256.

--*/

use hex_literal::hex;
use secengine_drivers::rsa_pss::{pss_sign, pss_verify};
use secengine_drivers::{
    Endianness, HashEngine, Pka, RegisterPort, RsaKey, SeError, SeResult, ShaAlgorithm,
};

const MODULUS: [u8; 384] = hex!(
    "b602152b6770c6c08aa3901a7822850efce7181c228472dce8db82bca07fff19"
    "16633101a5a9a01efcb0ef1bd13283925ffe74658f17043d97c87f4efcbf7a16"
    "250e41a319d0b28ecf633621d7f32d95bf00aa4fd402ed95ed5d6fdc4f55c308"
    "e262338418f1d975d72185864a51a689d8d6a82262474044be34c2b34a9d31de"
    "8e54f0a3f87c52664f86a3af4a11a376bb0856f95bd8a1731f0e871db977f5d3"
    "51fedbc1fe7a961a6e98e28bc57808e7e7651b711f3737d70786d447d2d3c302"
    "ed84705fd6404f736142f9c9400e947873734b1c43f8e48a8a78572a55c5fbc4"
    "ea94ab2ca6421200da676c7be98aae85fb6904c34e27918126de8df57deab756"
    "d93c61df37fa2470b793a50f47c32d2f429367422af9e8fe32cd8bd27c677546"
    "9f59b10662bc443444c385658d1dc95071bab24e38d59be3455b22e9c8fa013e"
    "668e52a931524941ed5dbc1b17337976faee5061325793b6825bce236d7e38d3"
    "d1b9ba48877f009f3d111640ae74aa2b030bd5ce078812a9ecf3a38450dd957d"
);

const PUBLIC_EXPONENT: [u8; 3] = hex!("010001");

const PRIVATE_EXPONENT: [u8; 384] = hex!(
    "4a2adb198ed3640a7df45cfa8c4df4cec0bc231503f3d922b03913336e6bfa35"
    "eceb8ac2d3112650ba44178bcc59bb47e09a3e304c78e29f7ec4932c4ace741f"
    "a60603354585c7dd6e214da3c8ee2d7b42143152ca604f14b35f4a000acc35e7"
    "dee88979a0f89cd6ea4d9cadb687434814f694193ed72e17553306cc2cf195aa"
    "cd714b8665f1b35a41b9e9e5ba5729b76e4bddb54b7a218059fd7f8ddb5048fa"
    "4e057ee3b4a19b9d35c8533905c4fe4c11fd1f8b9f5ecf006eeec07e6c2922e3"
    "d2cd95552c8e2bc5cea2d537dcc6b6d66f5cff32d62b4c684655cbcc0456e0ac"
    "96130cffa76191f6920f84adb2718be9268fa4efa8afdc7c256e40731129b7ff"
    "edaae25f0923f635bd5bd21399d458a01c78e8868ff98a3de0deb7d3c7b640c3"
    "659a1a0fcdbc740cf4b25bb54abee9936747a132bce16c743cdb619dfad3756b"
    "f0188d746ded98a3e6411c5dc3d356cf17377ea0dd2541a5d6024fd51727e57f"
    "b914d523928088c5770f93bce2dc91412e23aff9aed7fd0065ab4ac3f15bb1f9"
);

const SIGNATURE: [u8; 384] = hex!(
    "136eeaf8b59889c31901b6ede0ccea9aa12d0f8c9a7059013ca2fa7352cde214"
    "7f381390ad3eca854f7e02e55fdf23033caeddabfc62c947e1886f87613c950e"
    "6d84e3eafb563475c09512d2bcb22728d58bb8ab1b3540233dfb5c0fc79b1929"
    "da09aabcd137e1d0bc9a5f8d3ccc0f4496789847237d96179f3ba3b3888e7e2f"
    "f69d6992096843adc55b4368df08db061f772f99cee83a4e5a893a33956a3f02"
    "18594bb9e28ed675dbc240be4075ca0568f77c07ca7a6313c888dec1ccb7035f"
    "8641fac29d43cf4ae19b6f4c86fc51c54230d96042fd16af69d12a6cacf9592c"
    "ecdc83a7315b014589e39b7ad4136861b266bcfdc0658b363137854e178d12a3"
    "2d18c7c998026c1707c3d29e86aa87438b15041b84e83be2f7c40cb311981e40"
    "61555ba18f6e575d9797b11d397ff90d34f9b831cb7033b9ae3a5c601b1a127b"
    "180bfd699bbba3333017c54667cc75ecf7444e20aa9c4c1a89df138e699f484f"
    "a8b407af463b456d483ebccd24e79b81a8ca8cc3df7e21a7a56e0872e9f2a021"
);

// SHA-256 of the empty message
const MSG_HASH: [u8; 32] = hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");

const SALT: [u8; 32] = hex!("202122232425262728292a2b2c2d2e2f303132333435363738393a3b3c3d3e3f");

#[derive(Default, Debug)]
pub struct RsaPssKat {}

impl RsaPssKat {
    /// This function executes the Known Answer Tests (aka KAT) for RSA-PSS.
    ///
    /// With a fixed salt the encoding is deterministic, so the signature is
    /// compared against a precomputed value before it is verified.
    ///
    /// # Arguments
    ///
    /// * `pka` - PKA driver
    /// * `sha` - Hash engine driver
    ///
    /// # Returns
    ///
    /// * `SeResult` - Result denoting the KAT outcome.
    pub fn execute<P: RegisterPort, Q: RegisterPort>(
        &self,
        pka: &mut Pka<'_, '_, P>,
        sha: &mut HashEngine<'_, '_, Q>,
    ) -> SeResult<()> {
        let key = RsaKey::new_public(&MODULUS, &PUBLIC_EXPONENT)?
            .with_private_exponent(&PRIVATE_EXPONENT)?;
        self.kat_sign(pka, sha, &key)?;
        self.kat_verify(pka, sha, &key)
    }

    fn kat_sign<P: RegisterPort, Q: RegisterPort>(
        &self,
        pka: &mut Pka<'_, '_, P>,
        sha: &mut HashEngine<'_, '_, Q>,
        key: &RsaKey,
    ) -> SeResult<()> {
        let signature = pss_sign(pka, sha, key, &MSG_HASH, ShaAlgorithm::Sha256, &SALT)
            .map_err(|_| SeError::KAT_RSA_PSS_SIGNATURE_MISMATCH)?;
        if signature.as_bytes() != SIGNATURE {
            Err(SeError::KAT_RSA_PSS_SIGNATURE_MISMATCH)?;
        }
        Ok(())
    }

    fn kat_verify<P: RegisterPort, Q: RegisterPort>(
        &self,
        pka: &mut Pka<'_, '_, P>,
        sha: &mut HashEngine<'_, '_, Q>,
        key: &RsaKey,
    ) -> SeResult<()> {
        let valid = pss_verify(
            pka,
            sha,
            key,
            &SIGNATURE,
            Endianness::Big,
            &MSG_HASH,
            ShaAlgorithm::Sha256,
            SALT.len(),
        )
        .map_err(|_| SeError::KAT_RSA_PSS_VERIFY_FAILURE)?;
        if !valid {
            Err(SeError::KAT_RSA_PSS_VERIFY_FAILURE)?;
        }
        Ok(())
    }
}
