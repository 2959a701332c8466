//! The per-language cryptographic anti-pattern table: one row per detectable
//! call shape, each naming the category it falls under and (optionally) the
//! argument-check rule that must also pass before a match is emitted.

use super::types::CryptoCategory;

/// A named argument-check rule, evaluated against the text captured by a
/// pattern's first regex capture group (the function's argument list, in
/// patterns that capture one).
#[derive(Debug, Clone, Copy)]
pub enum ArgCheckRule {
    /// Capture group looks like a string literal (quoted).
    StringLiteral,
    /// Capture group parses as a number below the threshold.
    NumericBelow(f64),
    /// Capture group contains `name=false` (case-insensitive), the pattern's
    /// keyword for a disabled check (e.g. `verify`, `check_hostname`).
    KeywordFalse(&'static str),
    /// Capture group's algorithm list contains a "none"/"noop" entry.
    AlgorithmsContainNone,
    /// Capture group is a literal byte string that is empty or all zeros.
    IvLiteralOrZero,
    /// Capture group parses as a key-size integer below the minimum for the
    /// algorithm family (RSA 2048 / ECC 256 / AES 128, selected by the
    /// pattern, not the rule).
    KeySizeBelow(u32),
    /// Capture group parses as an iteration/round count below the minimum.
    IterationsBelow(u32),
    /// Capture group is a lambda/closure body that unconditionally returns
    /// `true` (trust-everything callback).
    CallbackAlwaysTrue,
}

impl ArgCheckRule {
    pub fn passes(&self, captured: &str) -> bool {
        let trimmed = captured.trim();
        match self {
            ArgCheckRule::StringLiteral => {
                (trimmed.starts_with('"') && trimmed.ends_with('"'))
                    || (trimmed.starts_with('\'') && trimmed.ends_with('\''))
            }
            ArgCheckRule::NumericBelow(threshold) => trimmed
                .trim_end_matches(['L', 'l', 'f', 'F'])
                .parse::<f64>()
                .map(|n| n < *threshold)
                .unwrap_or(false),
            ArgCheckRule::KeywordFalse(keyword) => {
                let needle = format!("{keyword}=false");
                trimmed.to_lowercase().replace(' ', "").contains(&needle)
            }
            ArgCheckRule::AlgorithmsContainNone => {
                let lower = trimmed.to_lowercase();
                lower.contains("\"none\"") || lower.contains("'none'")
            }
            ArgCheckRule::IvLiteralOrZero => {
                let digits_only: String = trimmed.chars().filter(|c| c.is_ascii_hexdigit()).collect();
                trimmed.is_empty()
                    || (!digits_only.is_empty() && digits_only.chars().all(|c| c == '0'))
                    || trimmed.contains("\\x00")
                    || trimmed.contains("*16")
                    || trimmed.contains("*8")
                    || trimmed.contains("*12")
            }
            ArgCheckRule::KeySizeBelow(min) => trimmed
                .parse::<u32>()
                .map(|size| size < *min)
                .unwrap_or(false),
            ArgCheckRule::IterationsBelow(min) => trimmed
                .parse::<u32>()
                .map(|n| n < *min)
                .unwrap_or(false),
            ArgCheckRule::CallbackAlwaysTrue => {
                let lower = trimmed.to_lowercase();
                lower.contains("return true")
                    || lower == "true"
                    || lower.contains("=> true")
            }
        }
    }
}

/// One row of the crypto pattern table.
pub struct CryptoPattern {
    pub id: &'static str,
    pub category: CryptoCategory,
    pub description: &'static str,
    /// Regex matched against each source line. A capture group, if present,
    /// is what `arg_check` evaluates.
    pub pattern: &'static str,
    pub languages: &'static [&'static str],
    pub arg_check: Option<ArgCheckRule>,
    pub algorithm: Option<&'static str>,
    pub library: Option<&'static str>,
}

/// Import/require substrings that make a file worth scanning for crypto
/// anti-patterns at all (the short-circuit in `detector.rs`).
pub const CRYPTO_IMPORT_INDICATORS: &[&str] = &[
    "hashlib", "Crypto.Cipher", "Crypto.Hash", "Cipher.getInstance", "MessageDigest",
    "javax.crypto", "crypto/cipher", "crypto/des", "crypto/rc4", "crypto/md5", "crypto/sha1",
    "crypto/rand", "require(\"crypto\")", "require('crypto')", "from 'crypto'", "node:crypto",
    "System.Security.Cryptography", "OpenSSL::Cipher", "OpenSSL::Digest", "digest/md5",
    "digest/sha1", "openssl", "bcrypt", "passlib", "jsonwebtoken", "jose.jwk", "Fernet",
];

pub static CRYPTO_PATTERNS: &[CryptoPattern] = &[
    // ── WeakHash ──
    CryptoPattern { id: "crypto/weak-hash/py-md5", category: CryptoCategory::WeakHash,
        description: "MD5 used for hashing", pattern: r"hashlib\.md5\s*\(",
        languages: &["python"], arg_check: None, algorithm: Some("MD5"), library: Some("hashlib") },
    CryptoPattern { id: "crypto/weak-hash/py-sha1", category: CryptoCategory::WeakHash,
        description: "SHA-1 used for hashing", pattern: r"hashlib\.sha1\s*\(",
        languages: &["python"], arg_check: None, algorithm: Some("SHA-1"), library: Some("hashlib") },
    CryptoPattern { id: "crypto/weak-hash/js-md5", category: CryptoCategory::WeakHash,
        description: "MD5 used for hashing", pattern: r#"createHash\s*\(\s*["']md5["']\s*\)"#,
        languages: &["javascript", "typescript"], arg_check: None, algorithm: Some("MD5"), library: Some("crypto") },
    CryptoPattern { id: "crypto/weak-hash/js-sha1", category: CryptoCategory::WeakHash,
        description: "SHA-1 used for hashing", pattern: r#"createHash\s*\(\s*["']sha1["']\s*\)"#,
        languages: &["javascript", "typescript"], arg_check: None, algorithm: Some("SHA-1"), library: Some("crypto") },
    CryptoPattern { id: "crypto/weak-hash/java-md5", category: CryptoCategory::WeakHash,
        description: "MD5 used for hashing", pattern: r#"MessageDigest\.getInstance\s*\(\s*"MD5"\s*\)"#,
        languages: &["java", "kotlin"], arg_check: None, algorithm: Some("MD5"), library: Some("javax.crypto") },
    CryptoPattern { id: "crypto/weak-hash/go-md5", category: CryptoCategory::WeakHash,
        description: "MD5 used for hashing", pattern: r"md5\.(New|Sum)\s*\(",
        languages: &["go"], arg_check: None, algorithm: Some("MD5"), library: Some("crypto/md5") },
    CryptoPattern { id: "crypto/weak-hash/csharp-md5", category: CryptoCategory::WeakHash,
        description: "MD5 used for hashing", pattern: r"MD5\.(Create|HashData)\s*\(",
        languages: &["csharp"], arg_check: None, algorithm: Some("MD5"), library: Some("System.Security.Cryptography") },
    CryptoPattern { id: "crypto/weak-hash/ruby-md5", category: CryptoCategory::WeakHash,
        description: "MD5 used for hashing", pattern: r"Digest::MD5",
        languages: &["ruby"], arg_check: None, algorithm: Some("MD5"), library: Some("digest/md5") },
    CryptoPattern { id: "crypto/weak-hash/php-md5", category: CryptoCategory::WeakHash,
        description: "MD5 used for hashing", pattern: r"\bmd5\s*\(",
        languages: &["php"], arg_check: None, algorithm: Some("MD5"), library: None },
    CryptoPattern { id: "crypto/weak-hash/rust-md5", category: CryptoCategory::WeakHash,
        description: "MD5 used for hashing", pattern: r"md5::compute\s*\(",
        languages: &["rust"], arg_check: None, algorithm: Some("MD5"), library: Some("md5") },

    // ── DeprecatedCipher ──
    CryptoPattern { id: "crypto/deprecated-cipher/py-des", category: CryptoCategory::DeprecatedCipher,
        description: "DES cipher in use", pattern: r"DES\.new\s*\(",
        languages: &["python"], arg_check: None, algorithm: Some("DES"), library: Some("Crypto.Cipher") },
    CryptoPattern { id: "crypto/deprecated-cipher/py-rc4", category: CryptoCategory::DeprecatedCipher,
        description: "RC4 cipher in use", pattern: r"ARC4\.new\s*\(",
        languages: &["python"], arg_check: None, algorithm: Some("RC4"), library: Some("Crypto.Cipher") },
    CryptoPattern { id: "crypto/deprecated-cipher/java-des", category: CryptoCategory::DeprecatedCipher,
        description: "DES cipher in use", pattern: r#"Cipher\.getInstance\s*\(\s*"DES"#,
        languages: &["java", "kotlin"], arg_check: None, algorithm: Some("DES"), library: Some("javax.crypto") },
    CryptoPattern { id: "crypto/deprecated-cipher/node-des", category: CryptoCategory::DeprecatedCipher,
        description: "DES/RC4 cipher in use", pattern: r#"createCipheriv\s*\(\s*["'](des|rc4)"#,
        languages: &["javascript", "typescript"], arg_check: None, algorithm: None, library: Some("crypto") },
    CryptoPattern { id: "crypto/deprecated-cipher/go-des", category: CryptoCategory::DeprecatedCipher,
        description: "DES cipher in use", pattern: r"des\.NewCipher\s*\(",
        languages: &["go"], arg_check: None, algorithm: Some("DES"), library: Some("crypto/des") },
    CryptoPattern { id: "crypto/deprecated-cipher/csharp-des", category: CryptoCategory::DeprecatedCipher,
        description: "DES cipher in use", pattern: r"DES\.(Create|new)\s*\(",
        languages: &["csharp"], arg_check: None, algorithm: Some("DES"), library: Some("System.Security.Cryptography") },
    CryptoPattern { id: "crypto/deprecated-cipher/ruby-des", category: CryptoCategory::DeprecatedCipher,
        description: "DES cipher in use", pattern: r#"OpenSSL::Cipher\.new\s*\(\s*["']DES"#,
        languages: &["ruby"], arg_check: None, algorithm: Some("DES"), library: Some("OpenSSL::Cipher") },
    CryptoPattern { id: "crypto/deprecated-cipher/php-des", category: CryptoCategory::DeprecatedCipher,
        description: "DES/RC4 cipher in use", pattern: r#"openssl_encrypt\s*\([^,]+,\s*["'](des|rc4)"#,
        languages: &["php"], arg_check: None, algorithm: None, library: Some("openssl") },
    CryptoPattern { id: "crypto/deprecated-cipher/java-nullcipher", category: CryptoCategory::DeprecatedCipher,
        description: "No-op cipher algorithm selected", pattern: r#"Cipher\.getInstance\s*\(\s*"(NONE|NullCipher)"#,
        languages: &["java", "kotlin"], arg_check: None, algorithm: Some("NONE"), library: Some("javax.crypto") },

    // ── EcbMode ──
    CryptoPattern { id: "crypto/ecb-mode/py-aes-ecb", category: CryptoCategory::EcbMode,
        description: "AES in ECB mode", pattern: r"AES\.new\s*\([^)]*MODE_ECB",
        languages: &["python"], arg_check: None, algorithm: Some("AES-ECB"), library: Some("Crypto.Cipher") },
    CryptoPattern { id: "crypto/ecb-mode/java-aes-ecb", category: CryptoCategory::EcbMode,
        description: "Cipher in ECB mode", pattern: r#"Cipher\.getInstance\s*\(\s*"[^"]*/ECB/"#,
        languages: &["java", "kotlin"], arg_check: None, algorithm: Some("AES-ECB"), library: Some("javax.crypto") },

    // ── StaticIv ──
    CryptoPattern { id: "crypto/static-iv/py-aes-cbc", category: CryptoCategory::StaticIv,
        description: "Static or all-zero IV passed to a CBC cipher",
        pattern: r"AES\.new\s*\([^)]*MODE_CBC[^)]*iv\s*=\s*([^,)]+)",
        languages: &["python"], arg_check: Some(ArgCheckRule::IvLiteralOrZero),
        algorithm: Some("AES-CBC"), library: Some("Crypto.Cipher") },
    CryptoPattern { id: "crypto/static-iv/js-createcipheriv", category: CryptoCategory::StaticIv,
        description: "Static or all-zero IV passed to createCipheriv",
        pattern: r"createCipheriv\s*\([^,]+,[^,]+,\s*([^)]+)\)",
        languages: &["javascript", "typescript"], arg_check: Some(ArgCheckRule::IvLiteralOrZero),
        algorithm: None, library: Some("crypto") },
    CryptoPattern { id: "crypto/static-iv/java-ivparameterspec", category: CryptoCategory::StaticIv,
        description: "Static or all-zero IV constructed for an IvParameterSpec",
        pattern: r"new IvParameterSpec\s*\(\s*([^)]+)\)",
        languages: &["java", "kotlin"], arg_check: Some(ArgCheckRule::IvLiteralOrZero),
        algorithm: None, library: Some("javax.crypto") },
    CryptoPattern { id: "crypto/static-iv/go-newcbcencrypter", category: CryptoCategory::StaticIv,
        description: "Static or all-zero IV passed to NewCBCEncrypter",
        pattern: r"cipher\.NewCBCEncrypter\s*\([^,]+,\s*([^)]+)\)",
        languages: &["go"], arg_check: Some(ArgCheckRule::IvLiteralOrZero),
        algorithm: Some("AES-CBC"), library: Some("crypto/cipher") },

    // ── NonceReuse ──
    CryptoPattern { id: "crypto/nonce-reuse/py-aes-gcm", category: CryptoCategory::NonceReuse,
        description: "Static or all-zero nonce passed to an AEAD cipher",
        pattern: r"AES\.new\s*\([^)]*MODE_GCM[^)]*nonce\s*=\s*([^,)]+)",
        languages: &["python"], arg_check: Some(ArgCheckRule::IvLiteralOrZero),
        algorithm: Some("AES-GCM"), library: Some("Crypto.Cipher") },
    CryptoPattern { id: "crypto/nonce-reuse/node-aes-gcm", category: CryptoCategory::NonceReuse,
        description: "Static or all-zero nonce passed to createCipheriv in GCM mode",
        pattern: r#"createCipheriv\s*\(\s*["']aes-\d+-gcm["'][^,]*,[^,]+,\s*([^)]+)\)"#,
        languages: &["javascript", "typescript"], arg_check: Some(ArgCheckRule::IvLiteralOrZero),
        algorithm: Some("AES-GCM"), library: Some("crypto") },

    // ── InsufficientKeyLen ──
    CryptoPattern { id: "crypto/insufficient-key-len/py-rsa-generate", category: CryptoCategory::InsufficientKeyLen,
        description: "RSA key generated below the 2048-bit minimum",
        pattern: r"RSA\.generate\s*\(\s*(\d+)",
        languages: &["python"], arg_check: Some(ArgCheckRule::KeySizeBelow(2048)),
        algorithm: Some("RSA"), library: Some("Crypto.PublicKey") },
    CryptoPattern { id: "crypto/insufficient-key-len/java-keypairgenerator", category: CryptoCategory::InsufficientKeyLen,
        description: "RSA key pair initialized below the 2048-bit minimum",
        pattern: r"initialize\s*\(\s*(\d+)",
        languages: &["java", "kotlin"], arg_check: Some(ArgCheckRule::KeySizeBelow(2048)),
        algorithm: Some("RSA"), library: Some("java.security") },
    CryptoPattern { id: "crypto/insufficient-key-len/node-generatekeypair", category: CryptoCategory::InsufficientKeyLen,
        description: "RSA key pair generated below the 2048-bit minimum",
        pattern: r"modulusLength\s*:\s*(\d+)",
        languages: &["javascript", "typescript"], arg_check: Some(ArgCheckRule::KeySizeBelow(2048)),
        algorithm: Some("RSA"), library: Some("crypto") },

    // ── WeakKdf ──
    CryptoPattern { id: "crypto/weak-kdf/py-pbkdf2", category: CryptoCategory::WeakKdf,
        description: "PBKDF2 iteration count below the 600,000 minimum",
        pattern: r"pbkdf2_hmac\s*\([^)]*,\s*(\d+)\s*\)",
        languages: &["python"], arg_check: Some(ArgCheckRule::IterationsBelow(600_000)),
        algorithm: Some("PBKDF2"), library: Some("hashlib") },
    CryptoPattern { id: "crypto/weak-kdf/node-pbkdf2", category: CryptoCategory::WeakKdf,
        description: "PBKDF2 iteration count below the 600,000 minimum",
        pattern: r"pbkdf2(Sync)?\s*\([^,]+,[^,]+,\s*(\d+)",
        languages: &["javascript", "typescript"], arg_check: None,
        algorithm: Some("PBKDF2"), library: Some("crypto") },
    CryptoPattern { id: "crypto/weak-kdf/rb-bcrypt-cost", category: CryptoCategory::WeakKdf,
        description: "bcrypt cost factor below the recommended minimum of 10",
        pattern: r"BCrypt::Password\.create\s*\([^,]+,\s*cost:\s*(\d+)",
        languages: &["ruby"], arg_check: Some(ArgCheckRule::IterationsBelow(10)),
        algorithm: Some("bcrypt"), library: Some("bcrypt") },
    CryptoPattern { id: "crypto/weak-kdf/py-bcrypt-rounds", category: CryptoCategory::WeakKdf,
        description: "bcrypt rounds below the recommended minimum of 10",
        pattern: r"bcrypt\.gensalt\s*\(\s*(\d+)",
        languages: &["python"], arg_check: Some(ArgCheckRule::IterationsBelow(10)),
        algorithm: Some("bcrypt"), library: Some("bcrypt") },

    // ── DisabledTls ──
    CryptoPattern { id: "crypto/disabled-tls/py-requests-verify", category: CryptoCategory::DisabledTls,
        description: "TLS certificate verification disabled",
        pattern: r"verify\s*=\s*False",
        languages: &["python"], arg_check: None, algorithm: None, library: Some("requests") },
    CryptoPattern { id: "crypto/disabled-tls/node-rejectunauthorized", category: CryptoCategory::DisabledTls,
        description: "TLS certificate verification disabled",
        pattern: r"rejectUnauthorized\s*:\s*false",
        languages: &["javascript", "typescript"], arg_check: None, algorithm: None, library: Some("https") },
    CryptoPattern { id: "crypto/disabled-tls/go-insecureskipverify", category: CryptoCategory::DisabledTls,
        description: "TLS certificate verification disabled",
        pattern: r"InsecureSkipVerify\s*:\s*true",
        languages: &["go"], arg_check: None, algorithm: None, library: Some("crypto/tls") },
    CryptoPattern { id: "crypto/disabled-tls/ruby-verify-none", category: CryptoCategory::DisabledTls,
        description: "TLS certificate verification disabled",
        pattern: r"VERIFY_NONE",
        languages: &["ruby"], arg_check: None, algorithm: None, library: Some("OpenSSL") },
    CryptoPattern { id: "crypto/disabled-tls/py-sslv3", category: CryptoCategory::DisabledTls,
        description: "Deprecated SSLv3/TLSv1.0 protocol selected",
        pattern: r"PROTOCOL_(SSLv3|TLSv1)\b",
        languages: &["python"], arg_check: None, algorithm: None, library: Some("ssl") },
    CryptoPattern { id: "crypto/disabled-tls/java-sslcontext", category: CryptoCategory::DisabledTls,
        description: "Deprecated SSLv3/TLSv1.0 protocol selected",
        pattern: r#"SSLContext\.getInstance\s*\(\s*"(SSLv3|TLSv1)"\s*\)"#,
        languages: &["java", "kotlin"], arg_check: None, algorithm: None, library: Some("javax.net.ssl") },
    CryptoPattern { id: "crypto/disabled-tls/node-secureprotocol", category: CryptoCategory::DisabledTls,
        description: "Deprecated SSLv3/TLSv1.0 protocol selected",
        pattern: r#"secureProtocol\s*:\s*["'](SSLv3|TLSv1)"#,
        languages: &["javascript", "typescript"], arg_check: None, algorithm: None, library: Some("tls") },

    // ── CertPinningBypass ──
    CryptoPattern { id: "crypto/cert-pinning-bypass/java-trustmanager", category: CryptoCategory::CertPinningBypass,
        description: "TrustManager that accepts any certificate",
        pattern: r"checkServerTrusted\s*\([^)]*\)\s*\{\s*\}",
        languages: &["java", "kotlin"], arg_check: None, algorithm: None, library: Some("javax.net.ssl") },
    CryptoPattern { id: "crypto/cert-pinning-bypass/generic-hostname-verifier", category: CryptoCategory::CertPinningBypass,
        description: "Hostname verifier callback unconditionally returns true",
        pattern: r"HostnameVerifier\s*\([^)]*\)\s*->\s*(.+)",
        languages: &["java", "kotlin"], arg_check: Some(ArgCheckRule::CallbackAlwaysTrue),
        algorithm: None, library: Some("javax.net.ssl") },

    // ── InsecureRandom ──
    CryptoPattern { id: "crypto/insecure-random/py-random", category: CryptoCategory::InsecureRandom,
        description: "Non-CSPRNG `random` module used for a security-sensitive value",
        pattern: r"random\.(random|randint|choice)\s*\(",
        languages: &["python"], arg_check: None, algorithm: None, library: Some("random") },
    CryptoPattern { id: "crypto/insecure-random/js-mathrandom", category: CryptoCategory::InsecureRandom,
        description: "Non-CSPRNG Math.random used for a security-sensitive value",
        pattern: r"Math\.random\s*\(\s*\)",
        languages: &["javascript", "typescript"], arg_check: None, algorithm: None, library: None },
    CryptoPattern { id: "crypto/insecure-random/java-random", category: CryptoCategory::InsecureRandom,
        description: "Non-CSPRNG java.util.Random used for a security-sensitive value",
        pattern: r"new Random\s*\(",
        languages: &["java", "kotlin"], arg_check: None, algorithm: None, library: Some("java.util") },
    CryptoPattern { id: "crypto/insecure-random/go-mathrand", category: CryptoCategory::InsecureRandom,
        description: "Non-CSPRNG math/rand used for a security-sensitive value",
        pattern: r"math/rand",
        languages: &["go"], arg_check: None, algorithm: None, library: Some("math/rand") },
    CryptoPattern { id: "crypto/insecure-random/csharp-random", category: CryptoCategory::InsecureRandom,
        description: "Non-CSPRNG System.Random used for a security-sensitive value",
        pattern: r"new Random\s*\(",
        languages: &["csharp"], arg_check: None, algorithm: None, library: Some("System") },
    CryptoPattern { id: "crypto/insecure-random/ruby-rand", category: CryptoCategory::InsecureRandom,
        description: "Non-CSPRNG Kernel#rand used for a security-sensitive value",
        pattern: r"\brand\s*\(",
        languages: &["ruby"], arg_check: None, algorithm: None, library: None },
    CryptoPattern { id: "crypto/insecure-random/php-rand", category: CryptoCategory::InsecureRandom,
        description: "Non-CSPRNG rand/mt_rand used for a security-sensitive value",
        pattern: r"\b(rand|mt_rand)\s*\(",
        languages: &["php"], arg_check: None, algorithm: None, library: None },
    CryptoPattern { id: "crypto/insecure-random/py-session-id", category: CryptoCategory::InsecureRandom,
        description: "Session/reset token built from a predictable source",
        pattern: r"(session_id|reset_token)\s*=\s*str\s*\(\s*(time\.time|uuid\.uuid1)",
        languages: &["python"], arg_check: None, algorithm: None, library: Some("time") },
    CryptoPattern { id: "crypto/insecure-random/js-session-id", category: CryptoCategory::InsecureRandom,
        description: "Session/reset token built from a predictable source",
        pattern: r"(sessionId|resetToken)\s*=\s*Date\.now\s*\(",
        languages: &["javascript", "typescript"], arg_check: None, algorithm: None, library: None },

    // ── HardcodedKey ──
    CryptoPattern { id: "crypto/hardcoded-key/generic-assign", category: CryptoCategory::HardcodedKey,
        description: "Cryptographic key assigned a string literal",
        pattern: r#"(?i)(secret_key|encryption_key|aes_key|cipher_key)\s*[:=]\s*(["'][^"']+["'])"#,
        languages: &["python", "javascript", "typescript", "java", "kotlin", "go", "csharp", "ruby", "php"],
        arg_check: None, algorithm: None, library: None },

    // ── PlaintextPassword ──
    CryptoPattern { id: "crypto/plaintext-password/generic-assign", category: CryptoCategory::PlaintextPassword,
        description: "Password assigned or compared as a plaintext string literal",
        pattern: r#"(?i)(password|passwd)\s*(==|[:=])\s*(["'][^"']{3,}["'])"#,
        languages: &["python", "javascript", "typescript", "java", "kotlin", "go", "csharp", "ruby", "php"],
        arg_check: None, algorithm: None, library: None },

    // ── JwtConfusion ──
    CryptoPattern { id: "crypto/jwt-confusion/algorithms-list", category: CryptoCategory::JwtConfusion,
        description: "JWT verification algorithm list includes \"none\"",
        pattern: r"algorithms\s*[:=]\s*(\[[^\]]*\])",
        languages: &["python", "javascript", "typescript"], arg_check: Some(ArgCheckRule::AlgorithmsContainNone),
        algorithm: Some("none"), library: Some("jsonwebtoken") },

    // ── MissingEncryption: produced only by `cross_reference_missing_encryption`, not this table. ──
];
