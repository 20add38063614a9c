//! Known-answer account shared by the test suites

use crate::crypto::KdfParams;

pub const TEST_MNEMONIC: &str =
    "raven what cart burst flag helmet chalk job board grocery tomato measure";
pub const TEST_PRIVATE_KEY: &str =
    "366cd8d38f760f970bdc70b18d19f40756b92beeebc84074ceea8e092d406666";
pub const TEST_PUBLIC_KEY: &str =
    "0204848ceb8eafdf754251c2391466744e5a85529ec81ae6b60a187a90a9406396";
pub const TEST_PUBKEY_BASE64: &str = "AgSEjOuOr991QlHCORRmdE5ahVKeyBrmtgoYepCpQGOW";
pub const TEST_ADDRESS: &str = "cosmos1sguafvgmel6f880ryvq8efh9522p8zvmrzlcrq";

/// A valid address that belongs to some other key
pub const OTHER_ADDRESS: &str = "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu";

/// Cheap KDF so keystore tests stay fast
pub const TEST_KDF: KdfParams = KdfParams { iterations: 1_024 };
