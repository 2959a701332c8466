//! Remediation text and an illustrative code snippet, one pair per category,
//! shown alongside a finding.

use super::types::CryptoCategory;

/// Returns (remediation text, remediation code snippet).
pub fn get_remediation(category: CryptoCategory) -> (String, Option<String>) {
    match category {
        CryptoCategory::WeakHash => (
            "Use SHA-256 or better for integrity hashing; use bcrypt/scrypt/Argon2 for passwords."
                .to_string(),
            Some("hashlib.sha256(data).hexdigest()".to_string()),
        ),
        CryptoCategory::DeprecatedCipher => (
            "Use AES-256-GCM instead of DES/RC4 or other broken/no-op ciphers.".to_string(),
            Some("AES.new(key, AES.MODE_GCM)".to_string()),
        ),
        CryptoCategory::EcbMode => (
            "Use an authenticated mode (AES-GCM) instead of ECB, which leaks plaintext structure."
                .to_string(),
            Some("AES.new(key, AES.MODE_GCM)".to_string()),
        ),
        CryptoCategory::StaticIv => (
            "Generate a fresh random IV per encryption with a CSPRNG.".to_string(),
            Some("iv = os.urandom(16)".to_string()),
        ),
        CryptoCategory::NonceReuse => (
            "Generate a fresh random nonce per encryption; never reuse a nonce with the same key."
                .to_string(),
            Some("nonce = os.urandom(12)".to_string()),
        ),
        CryptoCategory::InsecureRandom => (
            "Use a CSPRNG (`secrets`, `crypto.randomBytes`, `SecureRandom`) for security-sensitive values."
                .to_string(),
            Some("secrets.token_urlsafe(32)".to_string()),
        ),
        CryptoCategory::HardcodedKey => (
            "Load keys from a secrets manager or environment variable, never from source."
                .to_string(),
            Some("key = os.environ[\"ENCRYPTION_KEY\"]".to_string()),
        ),
        CryptoCategory::PlaintextPassword => (
            "Never store or compare passwords in plaintext; hash with bcrypt/scrypt/Argon2 and compare hashes."
                .to_string(),
            Some("bcrypt.checkpw(password.encode(), stored_hash)".to_string()),
        ),
        CryptoCategory::InsufficientKeyLen => (
            "Use RSA >= 2048 bits, ECC >= 256 bits, AES >= 128 bits.".to_string(),
            Some("rsa.generate_private_key(public_exponent=65537, key_size=2048)".to_string()),
        ),
        CryptoCategory::WeakKdf => (
            "Use PBKDF2 with >= 600,000 iterations, bcrypt with cost >= 10, or Argon2id."
                .to_string(),
            Some("hashlib.pbkdf2_hmac(\"sha256\", password, salt, 600_000)".to_string()),
        ),
        CryptoCategory::DisabledTls => (
            "Remove the verification bypass and deprecated-protocol selection; require TLS 1.2 or higher with a trusted CA bundle."
                .to_string(),
            Some("requests.get(url, verify=True)".to_string()),
        ),
        CryptoCategory::CertPinningBypass => (
            "Implement certificate/hostname validation that actually checks the chain; never accept unconditionally."
                .to_string(),
            None,
        ),
        CryptoCategory::JwtConfusion => (
            "Pin the accepted JWT algorithm list to the one the signing key expects; never include \"none\"."
                .to_string(),
            Some("jwt.verify(token, key, { algorithms: [\"RS256\"] })".to_string()),
        ),
        CryptoCategory::MissingEncryption => (
            "Encrypt the sensitive field before it reaches storage, using an approved key-management path."
                .to_string(),
            None,
        ),
    }
}
