//! Coefficients of the DOP853 method of Hairer, Nørsett and Wanner.

#![allow(clippy::excessive_precision, clippy::unreadable_literal)]

// Nodes.
pub(super) const C2: f64 = 0.526001519587677318785587544488e-01;
pub(super) const C3: f64 = 0.789002279381515978178381316732e-01;
pub(super) const C4: f64 = 0.118350341907227396726757197510;
pub(super) const C5: f64 = 0.281649658092772603273242802490;
pub(super) const C6: f64 = 0.333333333333333333333333333333;
pub(super) const C7: f64 = 0.25;
pub(super) const C8: f64 = 0.307692307692307692307692307692;
pub(super) const C9: f64 = 0.651282051282051282051282051282;
pub(super) const C10: f64 = 0.6;
pub(super) const C11: f64 = 0.857142857142857142857142857142;
pub(super) const C14: f64 = 0.1;
pub(super) const C15: f64 = 0.2;
pub(super) const C16: f64 = 0.777777777777777777777777777778;

// 8th-order weights.
pub(super) const B1: f64 = 5.42937341165687622380535766363e-02;
pub(super) const B6: f64 = 4.45031289275240888144113950566;
pub(super) const B7: f64 = 1.89151789931450038304281599044;
pub(super) const B8: f64 = -5.8012039600105847814672114227;
pub(super) const B9: f64 = 3.1116436695781989440891606237e-01;
pub(super) const B10: f64 = -1.52160949662516078556178806805e-01;
pub(super) const B11: f64 = 2.01365400804030348374776537501e-01;
pub(super) const B12: f64 = 4.47106157277725905176885569043e-02;

// 3rd-order embedded weights.
pub(super) const BHH1: f64 = 0.244094488188976377952755905512;
pub(super) const BHH2: f64 = 0.733846688281611857341361741547;
pub(super) const BHH3: f64 = 0.220588235294117647058823529412e-01;

// 5th-order error weights.
pub(super) const ER1: f64 = 0.1312004499419488073250102996e-01;
pub(super) const ER6: f64 = -0.1225156446376204440720569753e+01;
pub(super) const ER7: f64 = -0.4957589496572501915214079952;
pub(super) const ER8: f64 = 0.1664377182454986536961530415e+01;
pub(super) const ER9: f64 = -0.3503288487499736816886487290;
pub(super) const ER10: f64 = 0.3341791187130174790297318841;
pub(super) const ER11: f64 = 0.8192320648511571246570742613e-01;
pub(super) const ER12: f64 = -0.2235530786388629525884427845e-01;

// Stage coefficients, including the three extra dense-output stages 14 to 16.
pub(super) const A21: f64 = 5.26001519587677318785587544488e-02;
pub(super) const A31: f64 = 1.97250569845378994544595329183e-02;
pub(super) const A32: f64 = 5.91751709536136983633785987549e-02;
pub(super) const A41: f64 = 2.95875854768068491816892993775e-02;
pub(super) const A43: f64 = 8.87627564304205475450678981324e-02;
pub(super) const A51: f64 = 2.41365134159266685502369798665e-01;
pub(super) const A53: f64 = -8.84549479328286085344864962717e-01;
pub(super) const A54: f64 = 9.24834003261792003115737966543e-01;
pub(super) const A61: f64 = 3.7037037037037037037037037037e-02;
pub(super) const A64: f64 = 1.70828608729473871279604482173e-01;
pub(super) const A65: f64 = 1.25467687566822425016691814123e-01;
pub(super) const A71: f64 = 3.7109375e-02;
pub(super) const A74: f64 = 1.70252211019544039314978060272e-01;
pub(super) const A75: f64 = 6.02165389804559606850219397283e-02;
pub(super) const A76: f64 = -1.7578125e-02;
pub(super) const A81: f64 = 3.70920001185047927108779319836e-02;
pub(super) const A84: f64 = 1.70383925712239993810214054705e-01;
pub(super) const A85: f64 = 1.07262030446373284651809199168e-01;
pub(super) const A86: f64 = -1.53194377486244017527936158236e-02;
pub(super) const A87: f64 = 8.27378916381402288758473766002e-03;
pub(super) const A91: f64 = 6.24110958716075717114429577812e-01;
pub(super) const A94: f64 = -3.36089262944694129406857109825;
pub(super) const A95: f64 = -8.68219346841726006818189891453e-01;
pub(super) const A96: f64 = 2.75920996994467083049415600797e+01;
pub(super) const A97: f64 = 2.01540675504778934086186788979e+01;
pub(super) const A98: f64 = -4.34898841810699588477366255144e+01;
pub(super) const A101: f64 = 4.77662536438264365890433908527e-01;
pub(super) const A104: f64 = -2.48811461997166764192642586468;
pub(super) const A105: f64 = -5.90290826836842996371446475743e-01;
pub(super) const A106: f64 = 2.12300514481811942347288949897e+01;
pub(super) const A107: f64 = 1.52792336328824235832596922938e+01;
pub(super) const A108: f64 = -3.32882109689848629194453265587e+01;
pub(super) const A109: f64 = -2.03312017085086261358222928593e-02;
pub(super) const A111: f64 = -9.3714243008598732571704021658e-01;
pub(super) const A114: f64 = 5.18637242884406370830023853209;
pub(super) const A115: f64 = 1.09143734899672957818500254654;
pub(super) const A116: f64 = -8.14978701074692612513997267357;
pub(super) const A117: f64 = -1.85200656599969598641566180701e+01;
pub(super) const A118: f64 = 2.27394870993505042818970056734e+01;
pub(super) const A119: f64 = 2.49360555267965238987089396762;
pub(super) const A1110: f64 = -3.0467644718982195003823669022;
pub(super) const A121: f64 = 2.27331014751653820792359768449;
pub(super) const A124: f64 = -1.05344954667372501984066689879e+01;
pub(super) const A125: f64 = -2.00087205822486249909675718444;
pub(super) const A126: f64 = -1.79589318631187989172765950534e+01;
pub(super) const A127: f64 = 2.79488845294199600508499808837e+01;
pub(super) const A128: f64 = -2.85899827713502369474065508674;
pub(super) const A129: f64 = -8.87285693353062954433549289258;
pub(super) const A1210: f64 = 1.23605671757943030647266201528e+01;
pub(super) const A1211: f64 = 6.43392746015763530355970484046e-01;
pub(super) const A141: f64 = 5.61675022830479523392909219681e-02;
pub(super) const A147: f64 = 2.53500210216624811088794765333e-01;
pub(super) const A148: f64 = -2.46239037470802489917441475441e-01;
pub(super) const A149: f64 = -1.24191423263816360469010140626e-01;
pub(super) const A1410: f64 = 1.5329179827876569731206322685e-01;
pub(super) const A1411: f64 = 8.20105229563468988491666602057e-03;
pub(super) const A1412: f64 = 7.56789766054569976138603589584e-03;
pub(super) const A1413: f64 = -8.298e-03;
pub(super) const A151: f64 = 3.18346481635021405060768473261e-02;
pub(super) const A156: f64 = 2.83009096723667755288322961402e-02;
pub(super) const A157: f64 = 5.35419883074385676223797384372e-02;
pub(super) const A158: f64 = -5.49237485713909884646569340306e-02;
pub(super) const A1511: f64 = -1.08347328697249322858509316994e-04;
pub(super) const A1512: f64 = 3.82571090835658412954920192323e-04;
pub(super) const A1513: f64 = -3.40465008687404560802977114492e-04;
pub(super) const A1514: f64 = 1.41312443674632500278074618366e-01;
pub(super) const A161: f64 = -4.28896301583791923408573538692e-01;
pub(super) const A166: f64 = -4.69762141536116384314449447206;
pub(super) const A167: f64 = 7.68342119606259904184240953878;
pub(super) const A168: f64 = 4.06898981839711007970213554331;
pub(super) const A169: f64 = 3.56727187455281109270669543021e-01;
pub(super) const A1613: f64 = -1.39902416515901462129418009734e-03;
pub(super) const A1614: f64 = 2.9475147891527723389556272149;
pub(super) const A1615: f64 = -9.15095847217987001081870187138;

// Dense-output coefficients.
pub(super) const D41: f64 = -0.84289382761090128651353491142e+01;
pub(super) const D46: f64 = 0.56671495351937776962531783590;
pub(super) const D47: f64 = -0.30689499459498916912797304727e+01;
pub(super) const D48: f64 = 0.23846676565120698287728149680e+01;
pub(super) const D49: f64 = 0.21170345824450282767155149946e+01;
pub(super) const D410: f64 = -0.87139158377797299206789907490;
pub(super) const D411: f64 = 0.22404374302607882758541771650e+01;
pub(super) const D412: f64 = 0.63157877876946881815570249290;
pub(super) const D413: f64 = -0.88990336451333310820698117400e-01;
pub(super) const D414: f64 = 0.18148505520854727256656404962e+02;
pub(super) const D415: f64 = -0.91946323924783554000451984436e+01;
pub(super) const D416: f64 = -0.44360363875948939664310572000e+01;
pub(super) const D51: f64 = 0.10427508642579134603413151009e+02;
pub(super) const D56: f64 = 0.24228349177525818288430175319e+03;
pub(super) const D57: f64 = 0.16520045171727028198505394887e+03;
pub(super) const D58: f64 = -0.37454675472269020279518312152e+03;
pub(super) const D59: f64 = -0.22113666853125306036270938578e+02;
pub(super) const D510: f64 = 0.77334326684722638389603898808e+01;
pub(super) const D511: f64 = -0.30674084731089398182061213626e+02;
pub(super) const D512: f64 = -0.93321305264302278729567221706e+01;
pub(super) const D513: f64 = 0.15697238121770843886131091075e+02;
pub(super) const D514: f64 = -0.31139403219565177677282850411e+02;
pub(super) const D515: f64 = -0.93529243588444783865713862664e+01;
pub(super) const D516: f64 = 0.35816841486394083752465898540e+02;
pub(super) const D61: f64 = 0.19985053242002433820987653617e+02;
pub(super) const D66: f64 = -0.38703730874935176555105901742e+03;
pub(super) const D67: f64 = -0.18917813819516756882830838328e+03;
pub(super) const D68: f64 = 0.52780815920542364900561016686e+03;
pub(super) const D69: f64 = -0.11573902539959630126141871134e+02;
pub(super) const D610: f64 = 0.68812326946963000169666922661e+01;
pub(super) const D611: f64 = -0.10006050966910838403183860980e+01;
pub(super) const D612: f64 = 0.77771377980534432092869265740;
pub(super) const D613: f64 = -0.27782057523535084065932004339e+01;
pub(super) const D614: f64 = -0.60196695231264120758267380846e+02;
pub(super) const D615: f64 = 0.84320405506677161018159903784e+02;
pub(super) const D616: f64 = 0.11992291136182789328035130030e+02;
pub(super) const D71: f64 = -0.25693933462703749003312586129e+02;
pub(super) const D76: f64 = -0.15418974869023643374053993627e+03;
pub(super) const D77: f64 = -0.23152937917604549567536039109e+03;
pub(super) const D78: f64 = 0.35763911791061412378285349910e+03;
pub(super) const D79: f64 = 0.93405324183624310003907691704e+02;
pub(super) const D710: f64 = -0.37458323136451633156875139351e+02;
pub(super) const D711: f64 = 0.10409964950896230045147246184e+03;
pub(super) const D712: f64 = 0.29840293426660503123344363579e+02;
pub(super) const D713: f64 = -0.43533456590011143754432175058e+02;
pub(super) const D714: f64 = 0.96324553959188282948394950600e+02;
pub(super) const D715: f64 = -0.39177261675615439165231486172e+02;
pub(super) const D716: f64 = -0.14972683625798562581422125276e+03;
