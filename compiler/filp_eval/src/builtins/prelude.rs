//! Library words written in filp, run once the natives exist.

pub(super) const PRELUDE: &[&str] = &[
    "/tpop { /_ # = } set",
    "/tpush { $_ } set",
    "/clean { { pop } foreach } set",
    "/chop { dup length 1 - 1 # substr } set",
    "/sort { array asort adump } set",
    "/filp_doc [ hash =",
    "/setdoc { /filp_doc 2 rot 3 rot hset } set",
    "/getdoc { /filp_doc swap hget } set",
    "/#= { # = } set",
    "/not { { false } { true } ifelse } set",
    "/ne { eq not } set",
    "/ge { lt not } set",
    "/le { gt not } set",
    "/!= { == not } set",
    "/<= { > not } set",
    "/>= { < not } set",
    "/++ { 1 += } set",
    "/-- { 1 -= } set",
    "/abs { dup 0 < { -1 * } if } set",
];
