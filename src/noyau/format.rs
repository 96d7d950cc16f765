// src/noyau/format.rs
//
// Affichage canonique des résultats (les deux représentations).
// Positionnel si -7 < exposant < 21, sinon exponentiel : 1e+21, 1.5e-7.

/* ------------------------ Notation commune ------------------------ */

/// `chiffres` : chiffres significatifs sans zéro final (au moins un) ;
/// `haut` : exposant du premier chiffre (valeur = c1.c2c3… × 10^haut).
pub fn notation(negatif: bool, chiffres: &str, haut: i64) -> String {
    let signe = if negatif { "-" } else { "" };
    let n = chiffres.len() as i64;

    if haut >= 21 || haut <= -7 {
        let (tete, reste) = chiffres.split_at(1);
        let e_signe = if haut < 0 { '-' } else { '+' };
        return if reste.is_empty() {
            format!("{signe}{tete}e{e_signe}{}", haut.abs())
        } else {
            format!("{signe}{tete}.{reste}e{e_signe}{}", haut.abs())
        };
    }

    if haut < 0 {
        let zeros = "0".repeat((-haut - 1) as usize);
        format!("{signe}0.{zeros}{chiffres}")
    } else if n <= haut + 1 {
        let zeros = "0".repeat((haut + 1 - n) as usize);
        format!("{signe}{chiffres}{zeros}")
    } else {
        let (ent, frac) = chiffres.split_at((haut + 1) as usize);
        format!("{signe}{ent}.{frac}")
    }
}

/* ------------------------ Double ------------------------ */

/// Écriture la plus courte qui relit le même double.
pub fn format_f64(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        let s = if x > 0.0 { "Infinity" } else { "-Infinity" };
        return s.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }

    // "{:e}" donne déjà les chiffres minimaux : 1.2345e-7, 1e21
    let sci = format!("{:e}", x.abs());
    let (mantisse, exposant) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let haut: i64 = exposant.parse().unwrap_or(0);

    let chiffres = mantisse.replace('.', "");
    let chiffres = chiffres.trim_end_matches('0');
    let chiffres = if chiffres.is_empty() { "0" } else { chiffres };

    notation(x < 0.0, chiffres, haut)
}
